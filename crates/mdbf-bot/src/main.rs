//! Main entry point for MDBF Bot.

use anyhow::Context;
use mdbf_bot::MdbfBot;
use mdbf_common::{init_logging, LoggingConfig};
use mdbf_config::BotSettings;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging = LoggingConfig::from_env().context("Invalid logging settings")?;
    let _guard = init_logging(&logging).context("Failed to initialize logging")?;

    let settings = BotSettings::from_env().context("Invalid bot settings")?;
    info!(settings = ?settings, "Starting MDBF bot");

    if let Err(e) = MdbfBot::new(settings).start().await {
        error!("Bot stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
