//! Structured logging infrastructure for MDBF

use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Errors raised while installing the global subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level directive could not be parsed
    #[error("Invalid log filter '{directive}': {message}")]
    Filter {
        /// Directive that failed to parse
        directive: String,
        /// Parser message
        message: String,
    },

    /// The log format name is not recognized
    #[error("Unknown log format '{0}' (expected pretty, compact or json)")]
    Format(String),

    /// A global subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::Format(other.to_string())),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mdbf_cogs=trace")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Builds the configuration from `LOG_LEVEL`, `LOG_FORMAT` and `LOG_FILE`.
    pub fn from_env() -> Result<Self, LoggingError> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(file) = std::env::var("LOG_FILE") {
            if !file.trim().is_empty() {
                config.file_path = Some(PathBuf::from(file));
            }
        }

        Ok(config)
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        // RUST_LOG wins over the configured level when present
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| LoggingError::Filter {
            directive: self.level.clone(),
            message: e.to_string(),
        })
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Output goes through a non-blocking writer; the returned guard must be
/// kept alive for as long as log lines should be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let filter = config.env_filter()?;

    let (writer, guard) = match &config.file_path {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file_name = path
                .file_name()
                .map_or_else(|| "mdbf.log".into(), std::ffi::OsStr::to_os_string);
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_targets)
        .with_ansi(config.file_path.is_none());

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(guard)
}
