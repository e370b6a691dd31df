// Runs once when the gateway session is ready: set presence, seed the
// configuration table, then tell followers the rows exist.
//
// If seeding still fails after the retry policy is exhausted, the error is
// forwarded to `main`, which shuts the client down and exits non-zero.

use crate::core::commands::CommandError;
use crate::core::configuration::seed_then_signal;
use crate::core::events::{EventBus, EventModule};
use crate::discord::commands::presence;
use crate::discord::gateway::{BotEvent, READY};
use crate::discord::SharedConfiguration;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tokio::sync::mpsc::UnboundedSender;

pub struct ReadyEvent {
    configuration: SharedConfiguration,
    fatal: UnboundedSender<anyhow::Error>,
}

impl ReadyEvent {
    pub fn new(configuration: SharedConfiguration, fatal: UnboundedSender<anyhow::Error>) -> Self {
        Self {
            configuration,
            fatal,
        }
    }
}

#[async_trait]
impl EventModule<BotEvent> for ReadyEvent {
    fn name(&self) -> &str {
        READY
    }

    fn once(&self) -> bool {
        true
    }

    async fn execute(&self, payload: &BotEvent, bus: &EventBus<BotEvent>) -> Result<(), CommandError> {
        let BotEvent::Gateway {
            ctx,
            event: serenity::FullEvent::Ready { data_about_bot, .. },
        } = payload
        else {
            return Ok(());
        };

        tracing::info!(
            user = %data_about_bot.user.name,
            guilds = data_about_bot.guilds.len(),
            "🚀 Bot is ready!"
        );
        presence::on_ready(ctx);

        // A failed seed is already logged and sent on `fatal`.
        seed_then_signal(
            &*self.configuration,
            bus,
            || BotEvent::ExternalSourceReady { ctx: ctx.clone() },
            &self.fatal,
        )
        .await;
        Ok(())
    }
}
