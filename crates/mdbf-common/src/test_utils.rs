//! Test utilities and shared test helpers for MDBF.
//!
//! Fixtures for configuration files and helpers for laying out temporary
//! config directories, shared by the unit and integration tests of every
//! crate in the workspace.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once, PoisonError};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// In-memory log sink for asserting on emitted events.
///
/// Installed as the thread's default subscriber, so it only sees events
/// from the current thread (the `#[tokio::test]` runtime included).
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Routes every event on this thread into the capture until the guard drops.
    pub fn set_default(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Captured lines at `level` (`"ERROR"`, `"WARN"`, ...).
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        let marker = format!(" {level} ");
        self.contents()
            .lines()
            .filter(|line| line.contains(&marker))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write config fixture");
    path
}

/// Configuration-related test fixtures.
pub mod config_fixtures {
    /// Admins plus a single filter section.
    pub fn filter_config_yaml() -> &'static str {
        r#"
admins:
  - 1
filter:
  banned_words:
    - "x"
"#
    }

    /// Same document as [`filter_config_yaml`] with an extra banned word.
    pub fn filter_config_yaml_extended() -> &'static str {
        r#"
admins:
  - 1
filter:
  banned_words:
    - "x"
    - "y"
"#
    }

    /// Same document as [`filter_config_yaml`] in TOML.
    pub fn filter_config_toml() -> &'static str {
        concat!(
            "admins = [1]\n",
            "\n",
            "[filter]\n",
            "banned_words = [\"x\"]\n",
        )
    }

    /// A document without the required `admins` key.
    pub fn missing_admins_yaml() -> &'static str {
        "filter:\n  banned_words: [\"x\"]\n"
    }

    /// A document whose `admins` list is empty.
    pub fn empty_admins_yaml() -> &'static str {
        "admins: []\nfilter:\n  banned_words: [\"x\"]\n"
    }
}
