//! Configuration file parsing, dispatched on file extension.

use crate::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            }),
        }
    }
}

/// Reads and parses the configuration file at `path`.
pub async fn read_config(path: &Path) -> ConfigResult<ConfigDocument> {
    match tokio::fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileMissing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let format = ConfigFormat::from_path(path)?;
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::FileMissing(path.to_path_buf()),
            // Not UTF-8
            ErrorKind::InvalidData => ConfigError::parse(path, source),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let document = parse_config(&contents, format, path)?;
    debug!(path = %path.display(), ?format, "Parsed configuration file");
    Ok(document)
}

/// Parses `contents` as `format`. `path` is only used for error reporting.
pub fn parse_config(
    contents: &str,
    format: ConfigFormat,
    path: &Path,
) -> ConfigResult<ConfigDocument> {
    let value: Value = match format {
        ConfigFormat::Yaml => {
            let mut value: Value =
                serde_yaml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;
            value.apply_merge().map_err(|e| ConfigError::parse(path, e))?;
            value
        }
        ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?,
    };

    ConfigDocument::from_value(value).map_err(|root| {
        ConfigError::parse(
            path,
            NotAMapping {
                found: value_kind(&root),
            },
        )
    })
}

#[derive(Debug, thiserror::Error)]
#[error("top-level value must be a mapping, found {found}")]
struct NotAMapping {
    found: &'static str,
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
