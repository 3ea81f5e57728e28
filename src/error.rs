use std::path::PathBuf;

/// Errors surfaced by scmver operations.
///
/// Version *parse* failures are deliberately not represented here: a tag that
/// doesn't encode a version is an expected outcome, modeled as `None` by
/// [`tag_to_version`](crate::tag_to_version).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The dump target's extension maps to no known file template. The
    /// `bad file format:` prefix is load-bearing: callers match on it.
    #[error("bad file format: '{extension}' (of {}), only *.txt and *.py are supported", .path.display())]
    BadFileFormat {
        /// The unrecognized extension, including the leading dot (empty if none).
        extension: String,
        /// The resolved dump target.
        path: PathBuf,
    },

    /// The version file could not be written.
    #[error("failed to write version file {}: {source}", .path.display())]
    WriteFailed {
        /// The resolved dump target.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    ConfigRead {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Configuration`](crate::Configuration).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A version scheme name that is neither `guess-next-dev` nor `post-release`.
    #[error("unknown version scheme `{0}`, expected `guess-next-dev` or `post-release`")]
    UnknownVersionScheme(String),

    /// A local scheme name that is neither `node-and-date` nor `no-local-version`.
    #[error("unknown local scheme `{0}`, expected `node-and-date` or `no-local-version`")]
    UnknownLocalScheme(String),

    /// No pretend version is set and the SCM yielded no usable tag.
    #[error("no version found: no usable tag and no pretend version set")]
    NoVersion,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
