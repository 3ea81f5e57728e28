use core::fmt::{self, Display};
use core::str::FromStr;

use chrono::Local;
use serde::Deserialize;

use crate::config::Configuration;
use crate::error::Error;
use crate::meta::Meta;
use crate::version::guess_next_version;

/// Strategy for the numeric portion of the derived version string.
///
/// Both built-in schemes render the tag unchanged for an exact build (clean
/// tree, sitting on the tag). The `Custom` variant is the escape hatch for
/// callers with their own policy; it is invoked for exact builds too.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum VersionScheme {
    /// Anticipate the next release: `{guess_next_version(tag)}.dev{distance}`.
    GuessNextDev,
    /// Stay on the tag: `{tag}.post{distance}`.
    PostRelease,
    /// A caller-supplied function, called with the full [`Meta`] record.
    Custom(fn(&Meta) -> String),
}

impl VersionScheme {
    /// Renders the version portion for `meta`.
    pub fn apply(&self, meta: &Meta) -> String {
        match self {
            VersionScheme::GuessNextDev => guess_next_dev(meta),
            VersionScheme::PostRelease => post_release(meta),
            VersionScheme::Custom(scheme) => scheme(meta),
        }
    }
}

fn guess_next_dev(meta: &Meta) -> String {
    if meta.is_exact() {
        meta.tag.to_string()
    } else {
        let next = guess_next_version(&meta.tag);
        format!("{next}.dev{}", meta.distance.unwrap_or(0))
    }
}

fn post_release(meta: &Meta) -> String {
    if meta.is_exact() {
        meta.tag.to_string()
    } else {
        format!("{}.post{}", meta.tag, meta.distance.unwrap_or(0))
    }
}

impl FromStr for VersionScheme {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "guess-next-dev" => Ok(VersionScheme::GuessNextDev),
            "post-release" => Ok(VersionScheme::PostRelease),
            other => Err(Error::UnknownVersionScheme(other.to_owned())),
        }
    }
}

impl TryFrom<String> for VersionScheme {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Display for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VersionScheme::GuessNextDev => "guess-next-dev",
            VersionScheme::PostRelease => "post-release",
            VersionScheme::Custom(_) => "custom",
        })
    }
}

/// Strategy for the `+...` local suffix appended for non-exact builds.
///
/// A local segment makes a version string non-comparable for exactness
/// checks, so exact builds never get one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum LocalScheme {
    /// The commit id and/or a `d{YYYYMMDD}` stamp of the local date.
    ///
    /// Without a node, a stamp is appended only for a dirty tree. With a
    /// node, non-exact builds get `+{node}`, plus the date stamp when dirty.
    NodeAndDate,
    /// No local segment, ever. Useful for indexes that reject local versions.
    NoLocalVersion,
    /// A caller-supplied function; its return value is appended verbatim.
    Custom(fn(&Meta) -> String),
}

impl LocalScheme {
    /// Renders the local suffix for `meta` (empty string for none).
    pub fn apply(&self, meta: &Meta) -> String {
        match self {
            LocalScheme::NodeAndDate => node_and_date(meta),
            LocalScheme::NoLocalVersion => String::new(),
            LocalScheme::Custom(scheme) => scheme(meta),
        }
    }
}

fn today_stamp() -> String {
    Local::now().format("%Y%m%d").to_string()
}

fn node_and_date(meta: &Meta) -> String {
    match &meta.node {
        Some(node) if !meta.is_exact() => {
            if meta.dirty {
                format!("+{node}.d{}", today_stamp())
            } else {
                format!("+{node}")
            }
        }
        _ => {
            if meta.dirty {
                format!("+d{}", today_stamp())
            } else {
                String::new()
            }
        }
    }
}

impl FromStr for LocalScheme {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "node-and-date" => Ok(LocalScheme::NodeAndDate),
            "no-local-version" => Ok(LocalScheme::NoLocalVersion),
            other => Err(Error::UnknownLocalScheme(other.to_owned())),
        }
    }
}

impl TryFrom<String> for LocalScheme {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Display for LocalScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalScheme::NodeAndDate => "node-and-date",
            LocalScheme::NoLocalVersion => "no-local-version",
            LocalScheme::Custom(_) => "custom",
        })
    }
}

/// Combines the version scheme and local scheme outputs into the final
/// version string.
///
/// ```
/// use scmver::{format_version, Configuration, LocalScheme, Meta, VersionScheme};
///
/// let config = Configuration {
///     version_scheme: VersionScheme::GuessNextDev,
///     local_scheme: LocalScheme::NoLocalVersion,
///     write_to: None,
/// };
///
/// let exact = Meta::from_tag("1.1", None, false).unwrap();
/// assert_eq!(format_version(&exact, &config), "1.1");
///
/// let ahead = Meta::from_tag("1.1", Some(3), false).unwrap();
/// assert_eq!(format_version(&ahead, &config), "1.2.dev3");
/// ```
pub fn format_version(meta: &Meta, config: &Configuration) -> String {
    let version = config.version_scheme.apply(meta);
    let local = config.local_scheme.apply(meta);
    format!("{version}{local}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(version_scheme: VersionScheme, local_scheme: LocalScheme) -> Configuration {
        Configuration {
            version_scheme,
            local_scheme,
            write_to: None,
        }
    }

    fn meta(distance: Option<u64>, dirty: bool) -> Meta {
        Meta::from_tag("1.1", distance, dirty).unwrap()
    }

    #[test]
    fn test_guess_next_dev_node_and_date() {
        let today = today_stamp();
        let cases = [
            (meta(None, false), "1.1".to_owned()),
            (meta(Some(0), false), "1.2.dev0".to_owned()),
            (meta(None, true), format!("1.2.dev0+d{today}")),
            (meta(Some(3), false), "1.2.dev3".to_owned()),
            (meta(Some(3), true), format!("1.2.dev3+d{today}")),
        ];
        let config = config(VersionScheme::GuessNextDev, LocalScheme::NodeAndDate);
        for (meta, expected) in cases {
            assert_eq!(format_version(&meta, &config), expected, "meta: {meta:?}");
        }
    }

    #[test]
    fn test_post_release_node_and_date() {
        let today = today_stamp();
        let cases = [
            (meta(None, false), "1.1".to_owned()),
            (meta(Some(0), false), "1.1.post0".to_owned()),
            (meta(None, true), format!("1.1.post0+d{today}")),
            (meta(Some(3), false), "1.1.post3".to_owned()),
            (meta(Some(3), true), format!("1.1.post3+d{today}")),
        ];
        let config = config(VersionScheme::PostRelease, LocalScheme::NodeAndDate);
        for (meta, expected) in cases {
            assert_eq!(format_version(&meta, &config), expected, "meta: {meta:?}");
        }
    }

    #[test]
    fn test_no_local_version_never_appends() {
        for version_scheme in [VersionScheme::GuessNextDev, VersionScheme::PostRelease] {
            let config = config(version_scheme, LocalScheme::NoLocalVersion);
            for meta in [
                meta(None, false),
                meta(Some(0), false),
                meta(None, true),
                meta(Some(3), true),
            ] {
                let formatted = format_version(&meta, &config);
                assert!(!formatted.contains('+'), "{formatted} has a local segment");
            }
        }
    }

    #[test]
    fn test_node_and_date_with_node() {
        let today = today_stamp();
        let config = config(VersionScheme::GuessNextDev, LocalScheme::NodeAndDate);

        let clean = meta(Some(2), false).with_node("1a2b3c4");
        assert_eq!(format_version(&clean, &config), "1.2.dev2+1a2b3c4");

        let dirty = meta(Some(2), true).with_node("1a2b3c4");
        assert_eq!(
            format_version(&dirty, &config),
            format!("1.2.dev2+1a2b3c4.d{today}")
        );

        // exact builds stay bare even when the node is known
        let exact = meta(None, false).with_node("1a2b3c4");
        assert_eq!(format_version(&exact, &config), "1.1");
    }

    #[test]
    fn test_custom_schemes() {
        fn distance_only(meta: &Meta) -> String {
            format!("{}.r{}", meta.tag, meta.distance.unwrap_or(0))
        }
        fn node_only(meta: &Meta) -> String {
            match &meta.node {
                Some(node) => format!("+g{node}"),
                None => String::new(),
            }
        }
        let config = config(
            VersionScheme::Custom(distance_only),
            LocalScheme::Custom(node_only),
        );
        let meta = meta(Some(7), false).with_node("abc1234");
        assert_eq!(format_version(&meta, &config), "1.1.r7+gabc1234");
    }

    #[test]
    fn test_scheme_names_round_trip() {
        for name in ["guess-next-dev", "post-release"] {
            let scheme: VersionScheme = name.parse().unwrap();
            assert_eq!(scheme.to_string(), name);
        }
        for name in ["node-and-date", "no-local-version"] {
            let scheme: LocalScheme = name.parse().unwrap();
            assert_eq!(scheme.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_scheme_names() {
        assert!(matches!(
            "guess-next".parse::<VersionScheme>(),
            Err(Error::UnknownVersionScheme(name)) if name == "guess-next"
        ));
        assert!(matches!(
            "node-and-timestamp".parse::<LocalScheme>(),
            Err(Error::UnknownLocalScheme(name)) if name == "node-and-timestamp"
        ));
    }
}
