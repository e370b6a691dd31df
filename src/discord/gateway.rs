// Gateway glue: every event poise hands us becomes a named notification on the
// event bus. Poise itself has no commands registered; slash commands are routed
// by the command registry through the `interaction_create` channel.

use crate::core::events::Notification;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

/// Channel names. Gateway events use serenity's snake-case event names.
pub const READY: &str = "ready";
pub const INTERACTION_CREATE: &str = "interaction_create";
/// Emitted once the configuration rows are guaranteed to exist.
pub const EXTERNAL_SOURCE_READY: &str = "external_source_ready";

pub enum BotEvent {
    Gateway {
        ctx: serenity::Context,
        event: serenity::FullEvent,
    },
    ExternalSourceReady {
        ctx: serenity::Context,
    },
}

impl Notification for BotEvent {
    fn channel(&self) -> &str {
        match self {
            BotEvent::Gateway { event, .. } => event.snake_case_name(),
            BotEvent::ExternalSourceReady { .. } => EXTERNAL_SOURCE_READY,
        }
    }
}

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    let payload = BotEvent::Gateway {
        ctx: ctx.clone(),
        event: event.clone(),
    };

    let fired = data.events.emit(&payload).await;
    tracing::trace!(channel = payload.channel(), fired, "Gateway event emitted");
    Ok(())
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        // Expected for every slash command, since poise has none registered.
        poise::FrameworkError::UnknownInteraction { .. } => {}
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling framework error: {}", e);
            }
        }
    }
}
