//! Background polling of the configuration file.

use mdbf_cogs::{ReloadReport, SharedCogManager};
use mdbf_config::{ConfigLocator, ConfigResult};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Runs one reload pass against the currently located config file.
///
/// Uses the same manager lock as `/reload`, so a poll never overlaps a
/// command-driven pass.
pub async fn poll_once(
    manager: &SharedCogManager,
    locator: &ConfigLocator,
) -> ConfigResult<ReloadReport> {
    let path = locator.locate()?;
    manager.lock().await.reload(Some(path)).await
}

/// Spawns a task that calls [`poll_once`] every `period`.
///
/// The first pass runs one full period after spawning. Errors are logged
/// and the task keeps going.
pub fn spawn_config_poller(
    manager: SharedCogManager,
    locator: ConfigLocator,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?period, dir = %locator.dir().display(), "Config poller started");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match poll_once(&manager, &locator).await {
                Ok(report) if report.is_empty() => debug!("Config poll found no changes"),
                Ok(report) => info!(updated = ?report.updated, "Config poll reloaded cogs"),
                Err(e) => error!(error = %e, "Config poll failed"),
            }
        }
    })
}
