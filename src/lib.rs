//! # scmver
//!
//! A library (and CLI) that derives a package version string from
//! source-control metadata: the latest tag, the commit distance from it, and
//! the working tree's dirty state.
//!
//! The pipeline: a raw tag is parsed into a structured [`Version`]
//! ([`tag_to_version`]); for non-exact builds, [`guess_next_version`]
//! anticipates the release being worked towards; [`format_version`] renders
//! the final string from a [`Meta`] record per the configured
//! [`VersionScheme`] and [`LocalScheme`].
//!
//! ## Examples
//!
//! Format a version for a build three commits past the `v1.1` tag:
//!
//! ```
//! use scmver::prelude::*;
//!
//! let meta = Meta::from_tag("v1.1", Some(3), false).unwrap();
//! let config = Configuration {
//!     version_scheme: VersionScheme::GuessNextDev,
//!     local_scheme: LocalScheme::NoLocalVersion,
//!     ..Configuration::default()
//! };
//! assert_eq!(format_version(&meta, &config), "1.2.dev3");
//! ```
//!
//! Or, work with the version algebra directly:
//!
//! ```
//! use scmver::prelude::*;
//!
//! let tag = tag_to_version("release-1.1a2").unwrap();
//! let next = guess_next_version(&tag);
//! assert_eq!(next.to_string(), "1.1a3");
//! assert!(next > tag);
//! ```
//!
//! ## End-to-end
//!
//! [`get_version`] runs the whole pipeline against a git work tree, honoring
//! the [`PRETEND_KEY`] environment override and optionally persisting the
//! result via [`dump_version`]. Tag parsing failures are values (`None`),
//! never panics; only an unusable dump target is a hard error, since a
//! wrong-format version file would corrupt downstream packaging metadata.
#![warn(missing_docs)]

mod config;
mod dump;
mod error;
mod meta;
mod scheme;
pub mod scm;
mod version;

use std::env;
use std::path::Path;

pub use crate::config::Configuration;
pub use crate::dump::dump_version;
pub use crate::error::{Error, Result};
pub use crate::meta::Meta;
pub use crate::scheme::{format_version, LocalScheme, VersionScheme};
pub use crate::version::{guess_next_version, tag_to_version, PreTag, Version};

/// Environment variable that short-circuits all SCM inspection. When set and
/// non-empty, its value is the final version string, verbatim.
pub const PRETEND_KEY: &str = "SCMVER_PRETEND_VERSION";

/// Returns the pretend version from the environment, if one is set.
pub fn pretend_version() -> Option<String> {
    env::var(PRETEND_KEY).ok().filter(|value| !value.is_empty())
}

/// Computes the version string for the repository at `root`.
///
/// The [`PRETEND_KEY`] override wins outright when set. Otherwise the git
/// boundary assembles a [`Meta`] record, which is rendered with the
/// configured schemes. When `config.write_to` is set, the result is also
/// persisted below `root`.
///
/// # Errors
///
/// - [`Error::NoVersion`] when no pretend version is set and no usable tag
///   was found.
/// - [`Error::BadFileFormat`] / [`Error::WriteFailed`] from the dump step.
pub fn get_version(root: &Path, config: &Configuration) -> Result<String> {
    let version = match pretend_version() {
        Some(pretend) => pretend,
        None => {
            let meta = scm::git_version(root).ok_or(Error::NoVersion)?;
            format_version(&meta, config)
        }
    };
    if let Some(write_to) = &config.write_to {
        dump_version(root, &version, write_to)?;
    }
    Ok(version)
}

/// A convenience module appropriate for glob imports (`use scmver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::format_version;
    #[doc(no_inline)]
    pub use crate::get_version;
    #[doc(no_inline)]
    pub use crate::guess_next_version;
    #[doc(no_inline)]
    pub use crate::tag_to_version;
    #[doc(no_inline)]
    pub use crate::Configuration;
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::LocalScheme;
    #[doc(no_inline)]
    pub use crate::Meta;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionScheme;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    #[serial]
    fn test_pretend_version_wins() {
        let versions = ["1.0", "1.2.3.dev1+ge871260", "1.2.3.dev15+ge871260.d20180625"];
        for pretend in versions {
            env::set_var(PRETEND_KEY, pretend);
            let dir = tempfile::tempdir().unwrap();
            let config = Configuration {
                write_to: Some(PathBuf::from("VERSION.txt")),
                ..Configuration::default()
            };
            let version = get_version(dir.path(), &config).unwrap();
            assert_eq!(version, pretend);
            // the dump reproduces the override verbatim
            let written = fs::read_to_string(dir.path().join("VERSION.txt")).unwrap();
            assert_eq!(written, pretend);
        }
        env::remove_var(PRETEND_KEY);
    }

    #[test]
    #[serial]
    fn test_empty_pretend_version_is_unset() {
        env::set_var(PRETEND_KEY, "");
        assert_eq!(pretend_version(), None);
        env::remove_var(PRETEND_KEY);
    }

    #[test]
    #[serial]
    fn test_dump_errors_surface_under_pretend() {
        // a bad write target still fails, even under the override
        env::set_var(PRETEND_KEY, "1.0");
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration {
            write_to: Some(PathBuf::from("VERSION")),
            ..Configuration::default()
        };
        let err = get_version(dir.path(), &config).unwrap_err();
        assert!(err.to_string().starts_with("bad file format:"));
        env::remove_var(PRETEND_KEY);
    }

    #[test]
    #[serial]
    fn test_no_version_outside_a_repo() {
        env::remove_var(PRETEND_KEY);
        let dir = tempfile::tempdir().unwrap();
        let result = get_version(dir.path(), &Configuration::default());
        assert!(matches!(result, Err(Error::NoVersion)));
    }
}
