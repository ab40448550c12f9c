//! Poise framework setup and command registration logic.

use mdbf_cogs::SharedCogManager;
use mdbf_config::{AdminCache, ConfigLocator};
use std::sync::Arc;
use tracing::error;

/// Application data accessible in all commands.
pub struct Data {
    /// Bot display name used in log lines.
    pub bot_name: Arc<str>,
    /// Cogs and reload state; locking it serializes reload passes.
    pub manager: SharedCogManager,
    /// Live admin set, readable without waiting on a reload.
    pub admins: AdminCache,
    /// Finds the config file again on every `/reload`.
    pub locator: ConfigLocator,
}

impl Data {
    /// Builds the command data around an already started manager.
    pub async fn new(manager: SharedCogManager, locator: ConfigLocator) -> Self {
        let (bot_name, admins) = {
            let manager = manager.lock().await;
            (Arc::from(manager.bot_name()), manager.admins())
        };
        Self {
            bot_name,
            manager,
            admins,
            locator,
        }
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Creates a new Poise framework.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: vec![crate::reload::reload()],
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::event_handler(ctx, event, framework, data))
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    })
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, error = %error, "Command failed");
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(event = event.snake_case_name(), error = %error, "Event handler failed");
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "Failed to report framework error");
            }
        }
    }
}
