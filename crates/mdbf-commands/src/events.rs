//! Gateway event handling.

use crate::framework::{Data, Error};
use mdbf_cogs::FilterCog;
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Routes gateway events to the cogs that care about them.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } if !new_message.author.bot => {
            filter_message(ctx, new_message, data).await
        }
        serenity::FullEvent::Resume { .. } => {
            info!(bot = %data.bot_name, "Gateway session resumed");
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn filter_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    let banned = {
        let manager = data.manager.lock().await;
        manager
            .cog::<FilterCog>()
            .and_then(|filter| filter.find_banned(&message.content))
            .map(str::to_string)
    };

    if let Some(word) = banned {
        warn!(
            bot = %data.bot_name,
            author = %message.author.id,
            channel = %message.channel_id,
            word,
            "Deleting message containing a banned word"
        );
        message.delete(ctx).await?;
    }
    Ok(())
}
