use core::{
    cmp::Ordering,
    fmt::{self, Display},
};

/// The letter of a pre-release segment, in its canonical spelling.
///
/// Alternate spellings are folded during parsing: `alpha` becomes `a`, `beta`
/// becomes `b`, and `c`/`pre`/`preview` become `rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreTag {
    /// An alpha pre-release (`a`).
    Alpha,
    /// A beta pre-release (`b`).
    Beta,
    /// A release candidate (`rc`).
    Rc,
}

impl PreTag {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "a" | "alpha" => Some(PreTag::Alpha),
            "b" | "beta" => Some(PreTag::Beta),
            "c" | "rc" | "pre" | "preview" => Some(PreTag::Rc),
            _ => None,
        }
    }
}

impl Display for PreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PreTag::Alpha => "a",
            PreTag::Beta => "b",
            PreTag::Rc => "rc",
        })
    }
}

/// A structured public version: release components plus optional pre-release,
/// post-release, development, and local segments.
///
/// Versions are totally ordered by the public version scheme rules: release
/// components compare element-wise (missing components count as zero, so
/// `1.0` equals `1.0.0`), a pre-release sorts before its release, a
/// post-release after it, and a dev marker before the version it anticipates.
/// Local segments are compared last, segment-wise, with numeric segments
/// greater than alphanumeric ones.
///
/// [`Display`] renders the canonical form, with no separator before the
/// pre-release segment:
///
/// ```
/// use scmver::tag_to_version;
///
/// let version = tag_to_version("3.3.1-rc26").unwrap();
/// assert_eq!(version.to_string(), "3.3.1rc26");
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    /// The release components (`[1, 2, 3]` for `1.2.3`). Never empty.
    pub release: Vec<u64>,
    /// The pre-release segment, e.g. `(PreTag::Rc, 26)` for `rc26`.
    pub pre: Option<(PreTag, u64)>,
    /// The post-release number.
    pub post: Option<u64>,
    /// The development number. `dev` with no digits parses as 0.
    pub dev: Option<u64>,
    /// The local segment (after `+`), normalized to dot-separated lowercase.
    pub local: Option<String>,
}

/// Byte cursor over the public part of a version string. All version syntax
/// is ascii, so positions are byte offsets.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes one segment separator if present and returns it. The public
    /// version syntax treats `.`, `-`, and `_` interchangeably here.
    fn separator(&mut self) -> Option<u8> {
        match self.peek() {
            Some(sep @ (b'.' | b'-' | b'_')) => {
                self.pos += 1;
                Some(sep)
            }
            _ => None,
        }
    }

    /// Consumes a run of digits. `None` if there are no digits at the cursor
    /// or the value overflows.
    fn number(&mut self) -> Option<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)?
                .checked_add(u64::from(byte - b'0'))?;
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// Consumes a run of lowercase letters.
    fn word(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_lowercase()) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    fn done(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

/// Validates a local segment and normalizes its separators to dots.
fn parse_local(local: &str) -> Option<String> {
    if local.is_empty() {
        return None;
    }
    let mut segments = Vec::new();
    for segment in local.split(['.', '-', '_']) {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        segments.push(segment);
    }
    Some(segments.join("."))
}

/// Ranks the pre-release position of a version against the no-pre case: a
/// bare dev marker sorts before any pre-release of the same release, and any
/// pre-release sorts before the final release.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    BareDev,
    Pre(PreTag, u64),
    Release,
}

/// A dev marker sorts before the version it anticipates.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Final,
}

/// One dot-separated piece of a local segment. Numeric segments compare
/// numerically and order after alphanumeric ones.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum LocalSegment {
    Alpha(String),
    Number(u64),
}

impl Version {
    /// Parses a public version string, tolerating a leading `v` and the
    /// alternate `-`/`_` separator spellings before pre/post/dev segments.
    /// Returns `None` when the string is not a syntactically valid version.
    ///
    /// This is the strict entry point; [`tag_to_version`] additionally strips
    /// SCM tag prefixes like `release-`.
    pub fn parse(input: &str) -> Option<Self> {
        let lowered = input.trim().to_ascii_lowercase();
        let (public, local) = match lowered.split_once('+') {
            Some((public, local)) => (public, Some(parse_local(local)?)),
            None => (lowered.as_str(), None),
        };

        let mut cursor = Cursor::new(public.as_bytes());
        cursor.eat(b'v');

        let mut release = vec![cursor.number()?];
        loop {
            let saved = cursor.pos;
            if cursor.eat(b'.') {
                if let Some(component) = cursor.number() {
                    release.push(component);
                    continue;
                }
                cursor.pos = saved;
            }
            break;
        }

        let mut pre = None;
        {
            let saved = cursor.pos;
            let _ = cursor.separator();
            match PreTag::from_word(&cursor.word()) {
                Some(tag) => {
                    let _ = cursor.separator();
                    pre = Some((tag, cursor.number().unwrap_or(0)));
                }
                None => cursor.pos = saved,
            }
        }

        let mut post = None;
        {
            let saved = cursor.pos;
            let separator = cursor.separator();
            match cursor.word().as_str() {
                "post" | "rev" | "r" => {
                    let _ = cursor.separator();
                    post = Some(cursor.number().unwrap_or(0));
                }
                // implicit post release, as in `1.0-1`
                "" if separator == Some(b'-') => match cursor.number() {
                    Some(number) => post = Some(number),
                    None => cursor.pos = saved,
                },
                _ => cursor.pos = saved,
            }
        }

        let mut dev = None;
        {
            let saved = cursor.pos;
            let _ = cursor.separator();
            if cursor.word() == "dev" {
                let _ = cursor.separator();
                dev = Some(cursor.number().unwrap_or(0));
            } else {
                cursor.pos = saved;
            }
        }

        if !cursor.done() {
            return None;
        }

        Some(Version {
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    fn pre_key(&self) -> PreKey {
        match self.pre {
            Some((tag, number)) => PreKey::Pre(tag, number),
            None if self.post.is_none() && self.dev.is_some() => PreKey::BareDev,
            None => PreKey::Release,
        }
    }

    fn dev_key(&self) -> DevKey {
        match self.dev {
            Some(number) => DevKey::Dev(number),
            None => DevKey::Final,
        }
    }

    fn local_key(&self) -> Option<Vec<LocalSegment>> {
        self.local.as_ref().map(|local| {
            local
                .split('.')
                .map(|segment| match segment.parse::<u64>() {
                    Ok(number) => LocalSegment::Number(number),
                    Err(_) => LocalSegment::Alpha(segment.to_owned()),
                })
                .collect()
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let components = self.release.len().max(other.release.len());
        for idx in 0..components {
            let ours = self.release.get(idx).copied().unwrap_or(0);
            let theirs = other.release.get(idx).copied().unwrap_or(0);
            match ours.cmp(&theirs) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.pre_key()
            .cmp(&other.pre_key())
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local_key().cmp(&other.local_key()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    /// Equality follows the ordering, so `1.0` equals `1.0.0`.
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = self.release.iter();
        if let Some(first) = components.next() {
            write!(f, "{first}")?;
        }
        for component in components {
            write!(f, ".{component}")?;
        }
        if let Some((tag, number)) = &self.pre {
            write!(f, "{tag}{number}")?;
        }
        if let Some(number) = self.post {
            write!(f, ".post{number}")?;
        }
        if let Some(number) = self.dev {
            write!(f, ".dev{number}")?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{local}")?;
        }
        Ok(())
    }
}

/// Parses an SCM tag into a [`Version`], stripping any leading non-digit
/// prefix (`release-1.1` and `v1.1` both yield `1.1`).
///
/// Returns `None` when no usable version is encoded in the tag. Callers
/// should treat that as "no tag found", not as a fatal condition.
///
/// ```
/// use scmver::tag_to_version;
///
/// assert_eq!(tag_to_version("release-1.1").unwrap().to_string(), "1.1");
/// assert!(tag_to_version("not-a-version").is_none());
/// ```
pub fn tag_to_version(tag: &str) -> Option<Version> {
    let start = tag.find(|c: char| c.is_ascii_digit())?;
    Version::parse(&tag[start..])
}

/// Computes the version an in-development build is working towards, given
/// the most recent tag.
///
/// The local segment is always discarded. A dev tag already names the next
/// release, so only its dev marker is dropped. Otherwise the most specific
/// counter present is bumped: the pre-release number, then the post-release
/// number, then the last release component.
///
/// ```
/// use scmver::{guess_next_version, tag_to_version};
///
/// let tag = tag_to_version("1.1a2").unwrap();
/// assert_eq!(guess_next_version(&tag).to_string(), "1.1a3");
/// ```
pub fn guess_next_version(tag: &Version) -> Version {
    let mut next = Version {
        release: tag.release.clone(),
        pre: tag.pre,
        post: tag.post,
        dev: None,
        local: None,
    };
    if tag.dev.is_some() {
        return next;
    }
    if let Some((tag_letter, number)) = next.pre {
        next.pre = Some((tag_letter, number + 1));
    } else if let Some(number) = next.post {
        next.post = Some(number + 1);
    } else if let Some(last) = next.release.last_mut() {
        *last += 1;
    }
    next
}
