// Adapts a gateway interaction to the core dispatcher.
//
// Commands receive this wrapper so they can reach both the interaction and the
// serenity context (HTTP client, cache) without the core knowing about either.

use crate::core::commands::{CommandError, InteractionContext};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

pub struct GatewayInteraction {
    pub ctx: serenity::Context,
    pub interaction: serenity::Interaction,
}

impl GatewayInteraction {
    pub fn new(ctx: serenity::Context, interaction: serenity::Interaction) -> Self {
        Self { ctx, interaction }
    }

    /// The slash command payload, if this is a command interaction.
    pub fn command(&self) -> Option<&serenity::CommandInteraction> {
        self.interaction.as_command()
    }

    /// Send the initial response to a command interaction.
    pub async fn respond(
        &self,
        message: serenity::CreateInteractionResponseMessage,
    ) -> Result<(), CommandError> {
        let command = self
            .command()
            .ok_or("Only command interactions can be answered")?;

        command
            .create_response(
                &self.ctx.http,
                serenity::CreateInteractionResponse::Message(message),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl InteractionContext for GatewayInteraction {
    fn command_name(&self) -> Option<&str> {
        self.command().map(|command| command.data.name.as_str())
    }

    async fn reply_ephemeral(&self, content: &str) -> Result<(), CommandError> {
        self.respond(
            serenity::CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        )
        .await
    }
}
