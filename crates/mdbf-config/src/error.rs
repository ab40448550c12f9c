//! Configuration error types.

use crate::fingerprint::FingerprintError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// None of the candidate files exist in the config directory.
    #[error(
        "No configuration found in {}: expected one of {}",
        .dir.display(),
        .candidates.join(", ")
    )]
    NotFound {
        /// Directory that was scanned.
        dir: PathBuf,
        /// File names that were looked for.
        candidates: Vec<&'static str>,
    },

    /// More than one candidate file exists.
    #[error(
        "Multiple possible configurations found ({}); remove or rename all but one of them",
        display_paths(.found)
    )]
    Ambiguous {
        /// Every candidate that exists.
        found: Vec<PathBuf>,
    },

    /// The file to read does not exist.
    #[error("Could not find {}", .0.display())]
    FileMissing(PathBuf),

    /// The file extension maps to no known format.
    #[error("Unsupported file extension '{extension}' for {}", .path.display())]
    UnsupportedExtension {
        /// Offending file.
        path: PathBuf,
        /// Extension as found (may be empty).
        extension: String,
    },

    /// The file exists but could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content is malformed for its format.
    #[error("Error reading config file {}: {source}", .path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document cannot be canonicalized for hashing.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    /// The document parsed but violates a semantic rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A required environment variable is not set.
    #[error("Missing required environment variable '{0}'")]
    MissingEnv(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name.
        var: &'static str,
        /// Parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::Invalid`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Wraps a parser error for `path`.
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
