//! Cog error types.

use mdbf_config::FingerprintError;
use thiserror::Error;

/// A cog could not take on its configuration section.
#[derive(Debug, Error)]
pub enum CogError {
    /// The section does not have the shape the cog expects.
    #[error("Invalid configuration for cog '{cog}': {source}")]
    InvalidSection {
        /// Cog identifier.
        cog: &'static str,
        /// Deserialization error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The cog's own update logic failed.
    #[error("Cog '{cog}' failed to apply its configuration: {message}")]
    Apply {
        /// Cog identifier.
        cog: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The section could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}

impl CogError {
    /// Wraps a section deserialization error.
    pub const fn invalid_section(cog: &'static str, source: serde_yaml::Error) -> Self {
        Self::InvalidSection { cog, source }
    }

    /// Creates an update failure.
    pub fn apply(cog: &'static str, message: impl Into<String>) -> Self {
        Self::Apply {
            cog,
            message: message.into(),
        }
    }
}

/// Result type for cog operations.
pub type CogResult<T> = Result<T, CogError>;
