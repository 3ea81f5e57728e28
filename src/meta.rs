use crate::version::{tag_to_version, Version};

/// The SCM metadata a version string is derived from: the latest tag, the
/// commit distance from it, the working-tree dirty flag, and (when the SCM
/// boundary supplies one) the short commit id.
///
/// A `Meta` is assembled once per version computation and consumed by
/// [`format_version`](crate::format_version); it is never mutated. The
/// [`Configuration`](crate::Configuration) travels alongside it by reference
/// rather than inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    /// The structured version parsed from the latest tag.
    pub tag: Version,
    /// Commits since the tag. `None` means the current commit *is* the tag;
    /// `Some(0)` is a real distance and counts as non-exact.
    pub distance: Option<u64>,
    /// Whether the working tree has uncommitted modifications.
    pub dirty: bool,
    /// The short commit id, without the `g` prefix git prepends.
    pub node: Option<String>,
}

impl Meta {
    /// Assembles a record from an already-parsed tag.
    pub fn new(tag: Version, distance: Option<u64>, dirty: bool) -> Self {
        Self {
            tag,
            distance,
            dirty,
            node: None,
        }
    }

    /// Attaches the short commit id reported by the SCM.
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Assembles a record from a raw tag string. `None` when the tag does
    /// not encode a version.
    ///
    /// ```
    /// use scmver::Meta;
    ///
    /// let meta = Meta::from_tag("v1.1", Some(3), false).unwrap();
    /// assert_eq!(meta.tag.to_string(), "1.1");
    /// assert!(!meta.is_exact());
    /// ```
    pub fn from_tag(tag: &str, distance: Option<u64>, dirty: bool) -> Option<Self> {
        Some(Self::new(tag_to_version(tag)?, distance, dirty))
    }

    /// True only for a clean tree sitting exactly on the tag. Any distance,
    /// including zero, makes the build non-exact.
    pub fn is_exact(&self) -> bool {
        self.distance.is_none() && !self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactness() {
        let cases = [
            (None, false, true),
            (None, true, false),
            (Some(0), false, false), // zero distance is still a distance
            (Some(3), false, false),
            (Some(3), true, false),
        ];
        for (distance, dirty, exact) in cases {
            let meta = Meta::from_tag("1.1", distance, dirty).unwrap();
            assert_eq!(meta.is_exact(), exact, "distance={distance:?} dirty={dirty}");
        }
    }

    #[test]
    fn test_from_tag_rejects_unversioned_tags() {
        assert_eq!(Meta::from_tag("latest", None, false), None);
    }

    #[test]
    fn test_with_node() {
        let meta = Meta::from_tag("1.1", Some(2), false)
            .unwrap()
            .with_node("1a2b3c4");
        assert_eq!(meta.node.as_deref(), Some("1a2b3c4"));
    }
}
