use crate::core::commands::{CommandDispatcher, CommandError, InteractionContext};
use crate::core::events::{EventBus, EventModule};
use crate::discord::gateway::{BotEvent, INTERACTION_CREATE};
use crate::discord::interaction::GatewayInteraction;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Hands every inbound interaction to the command dispatcher.
pub struct InteractionCreateEvent {
    dispatcher: Arc<CommandDispatcher<GatewayInteraction>>,
}

impl InteractionCreateEvent {
    pub fn new(dispatcher: Arc<CommandDispatcher<GatewayInteraction>>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventModule<BotEvent> for InteractionCreateEvent {
    fn name(&self) -> &str {
        INTERACTION_CREATE
    }

    async fn execute(&self, payload: &BotEvent, _bus: &EventBus<BotEvent>) -> Result<(), CommandError> {
        let BotEvent::Gateway {
            ctx,
            event: serenity::FullEvent::InteractionCreate { interaction, .. },
        } = payload
        else {
            return Ok(());
        };

        let interaction = GatewayInteraction::new(ctx.clone(), interaction.clone());
        let outcome = self.dispatcher.dispatch(&interaction).await;
        tracing::debug!(
            command = interaction.command_name().unwrap_or("-"),
            ?outcome,
            "Interaction handled"
        );
        Ok(())
    }
}
