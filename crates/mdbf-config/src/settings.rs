//! Process-level settings read from the environment.
//!
//! These cover the bot's own identity and runtime knobs. Cog configuration
//! lives in the config file and never comes from the environment.

use crate::error::{ConfigError, ConfigResult};
use crate::locator::DEFAULT_CONFIG_DIR;
use mdbf_common::GuildId;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings for one bot process.
#[derive(Clone)]
pub struct BotSettings {
    /// Discord bot token (`BOT_TOKEN`).
    pub token: String,
    /// Display name used in log lines (`BOT_NAME`).
    pub name: String,
    /// Guild to register commands in; global registration when unset (`BOT_GUILD_ID`).
    pub guild_id: Option<GuildId>,
    /// Directory holding the config file (`MDBF_CONFIG_DIR`).
    pub config_dir: PathBuf,
    /// Interval of the background reload poll; disabled when unset or zero (`RELOAD_POLL_SECONDS`).
    pub poll_interval: Option<Duration>,
}

impl BotSettings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let token = lookup("BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("BOT_TOKEN"))?;

        let name = lookup("BOT_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Bot".to_string());

        let guild_id = parse_var::<u64>(&lookup, "BOT_GUILD_ID")?.map(GuildId);

        let config_dir = lookup("MDBF_CONFIG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR), PathBuf::from);

        let poll_interval = parse_var::<u64>(&lookup, "RELOAD_POLL_SECONDS")?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            token,
            name,
            guild_id,
            config_dir,
            poll_interval,
        })
    }
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSettings")
            .field("token", &"<redacted>")
            .field("name", &self.name)
            .field("guild_id", &self.guild_id)
            .field("config_dir", &self.config_dir)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::EnvParse {
                var,
                source: Box::new(e),
            }),
        _ => Ok(None),
    }
}
