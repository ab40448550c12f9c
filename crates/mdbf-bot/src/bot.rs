//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use crate::polling::spawn_config_poller;
use mdbf_cogs::{CogConstructor, CogInit, CogManager, CogRegistry, FilterCog, SharedCogManager};
use mdbf_commands::{create_framework, Data};
use mdbf_config::{BotSettings, ConfigLocator};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Section ownership of the built-in cogs.
pub fn default_registry() -> CogRegistry {
    CogRegistry::new().register(FilterCog::NAME, "filter")
}

/// Built-in cogs, in the order they are updated.
pub fn default_cogs() -> Vec<CogConstructor> {
    vec![CogConstructor::of::<FilterCog>()]
}

/// Main bot structure.
pub struct MdbfBot {
    settings: BotSettings,
    locator: ConfigLocator,
}

impl MdbfBot {
    /// Creates a new bot instance.
    pub fn new(settings: BotSettings) -> Self {
        let locator = ConfigLocator::new(&settings.config_dir);
        Self { settings, locator }
    }

    /// Settings the bot was created with.
    pub const fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Locates the config file and starts every built-in cog from it.
    pub async fn load_cogs(&self) -> BotResult<SharedCogManager> {
        let path = self.locator.locate()?;
        info!(bot = %self.settings.name, path = %path.display(), "Loading configuration");

        let manager = CogManager::start(
            self.settings.name.as_str(),
            path,
            default_registry(),
            &default_cogs(),
        )
        .await?;
        Ok(manager.into_shared())
    }

    /// Starts the bot and runs until the gateway connection ends.
    pub async fn start(self) -> BotResult<()> {
        let manager = self.load_cogs().await?;

        if let Some(period) = self.settings.poll_interval {
            spawn_config_poller(manager.clone(), self.locator.clone(), period);
        }

        let data = Data::new(manager, self.locator.clone()).await;
        let guild_id = self
            .settings
            .guild_id
            .filter(|id| id.0 != 0)
            .map(|id| serenity::GuildId::new(id.0));
        let bot_name = self.settings.name.clone();

        let framework = create_framework()
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    let commands = &framework.options().commands;
                    match guild_id {
                        Some(guild_id) => {
                            poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                        }
                        None => {
                            warn!("No guild configured; registering commands globally");
                            poise::builtins::register_globally(ctx, commands).await?;
                        }
                    }
                    info!("{bot_name} is ready (logged in as {})", ready.user.name);
                    Ok(data)
                })
            })
            .build();

        let intents =
            serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
        let mut client = serenity::ClientBuilder::new(&self.settings.token, intents)
            .framework(framework)
            .await?;

        client.start().await?;
        Ok(())
    }
}
