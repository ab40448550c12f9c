//! Discovery of the single configuration file in the config directory.

use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory searched when none is configured.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Recognized configuration file names, in lookup order.
pub const CONFIG_CANDIDATES: [&str; 3] = ["config.yml", "config.yaml", "config.toml"];

/// Finds exactly one configuration file among [`CONFIG_CANDIDATES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocator {
    dir: PathBuf,
}

impl ConfigLocator {
    /// Creates a locator scanning `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory being scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the only candidate that exists.
    ///
    /// Zero matches is [`ConfigError::NotFound`], several is
    /// [`ConfigError::Ambiguous`]; neither falls back to a default.
    pub fn locate(&self) -> ConfigResult<PathBuf> {
        let mut found: Vec<PathBuf> = CONFIG_CANDIDATES
            .iter()
            .map(|name| self.dir.join(name))
            .filter(|path| path.is_file())
            .collect();

        debug!(dir = %self.dir.display(), matches = found.len(), "Scanned config directory");

        match found.len() {
            0 => Err(ConfigError::NotFound {
                dir: self.dir.clone(),
                candidates: CONFIG_CANDIDATES.to_vec(),
            }),
            1 => Ok(found.remove(0)),
            _ => Err(ConfigError::Ambiguous { found }),
        }
    }
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdbf_common::test_utils::write_config;

    #[test]
    fn test_locate_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "config.toml", "admins = [1]\n");

        let locator = ConfigLocator::new(dir.path());
        assert_eq!(locator.locate().unwrap(), path);
    }

    #[test]
    fn test_locate_none() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "settings.yml", "admins: [1]\n");

        let err = ConfigLocator::new(dir.path()).locate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFound { ref candidates, .. } if candidates.len() == 3
        ));
    }

    #[test]
    fn test_locate_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "config.yml", "admins: [1]\n");
        write_config(dir.path(), "config.toml", "admins = [1]\n");

        match ConfigLocator::new(dir.path()).locate() {
            Err(ConfigError::Ambiguous { found }) => {
                assert_eq!(
                    found,
                    vec![dir.path().join("config.yml"), dir.path().join("config.toml")]
                );
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_named_like_candidate_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config.yaml")).unwrap();
        let path = write_config(dir.path(), "config.yml", "admins: [1]\n");

        assert_eq!(ConfigLocator::new(dir.path()).locate().unwrap(), path);
    }

    #[test]
    fn test_default_dir() {
        assert_eq!(ConfigLocator::default().dir(), Path::new(DEFAULT_CONFIG_DIR));
    }
}
