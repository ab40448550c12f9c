//! Administrative configuration reload command.

use crate::framework::{Context, Data, Error};
use mdbf_common::{join_names, truncate_string, UserId, MESSAGE_LIMIT};
use std::fmt;
use tracing::{error, info, warn};

/// Result of a `/reload` invocation as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// These cogs picked up new configuration.
    Reloaded(Vec<&'static str>),
    /// The configuration file is unchanged.
    NoChanges,
    /// The caller is not an admin.
    Unauthorized,
    /// The pass failed, or every changed cog failed; details are in the log only.
    Failed,
}

impl fmt::Display for ReloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reloaded(cogs) => {
                let message = format!("Configuration reloaded for cogs: {}", join_names(cogs));
                f.write_str(&truncate_string(&message, MESSAGE_LIMIT))
            }
            Self::NoChanges => f.write_str("No configuration changes detected"),
            Self::Unauthorized => f.write_str("You do not have permission to use this command"),
            Self::Failed => {
                f.write_str("An internal error occurred while reloading the configuration")
            }
        }
    }
}

/// Checks `user` against the admin set, then runs a reload pass against
/// the freshly located config file.
///
/// A pass where cogs failed and none changed is reported as a failure.
/// When some cogs changed, the reply lists them and failures are only logged.
pub async fn run_reload(data: &Data, user: UserId, user_name: &str) -> ReloadOutcome {
    if !data.admins.is_admin(user) {
        warn!(
            bot = %data.bot_name,
            %user,
            "{user_name} requested a config reload, but they are not an admin"
        );
        return ReloadOutcome::Unauthorized;
    }

    let path = match data.locator.locate() {
        Ok(path) => path,
        Err(e) => {
            error!(bot = %data.bot_name, error = %e, "Could not locate configuration for reload");
            return ReloadOutcome::Failed;
        }
    };
    info!(
        bot = %data.bot_name,
        %user,
        "{user_name} requested a config reload, using file {}",
        path.display()
    );

    let mut manager = data.manager.lock().await;
    match manager.reload(Some(path)).await {
        Ok(report) if report.is_empty() && !report.failed.is_empty() => {
            error!(
                bot = %data.bot_name,
                failed = ?report.failed,
                "No cog could apply its configuration"
            );
            ReloadOutcome::Failed
        }
        Ok(report) if report.is_empty() => ReloadOutcome::NoChanges,
        Ok(report) => ReloadOutcome::Reloaded(report.updated),
        Err(e) => {
            error!(bot = %data.bot_name, error = %e, "Configuration reload failed");
            ReloadOutcome::Failed
        }
    }
}

/// Reloads the bot's configuration without restarting the bot
#[poise::command(slash_command)]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let outcome = run_reload(ctx.data(), UserId(author.id.get()), &author.name).await;

    ctx.send(
        poise::CreateReply::default()
            .content(outcome.to_string())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
