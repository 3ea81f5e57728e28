use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::scheme::{LocalScheme, VersionScheme};

/// Caller-owned settings for a version computation.
///
/// A `Configuration` is passed by reference into formatting calls; it is
/// never mutated by the library. It can be built in code or loaded from a
/// TOML file:
///
/// ```toml
/// version-scheme = "post-release"
/// local-scheme = "no-local-version"
/// write-to = "src/_version.py"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    /// Strategy for the numeric portion of the version string.
    pub version_scheme: VersionScheme,
    /// Strategy for the `+...` suffix of non-exact builds.
    pub local_scheme: LocalScheme,
    /// Where to persist the computed version, relative to the project root.
    pub write_to: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version_scheme: VersionScheme::GuessNextDev,
            local_scheme: LocalScheme::NodeAndDate,
            write_to: None,
        }
    }
}

impl Configuration {
    /// Loads a configuration from a TOML file. Unknown keys and unknown
    /// scheme names are errors; a missing file is too, since the caller
    /// asked for that specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}
