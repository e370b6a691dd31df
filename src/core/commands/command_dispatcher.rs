// Routes inbound interactions to registered commands.
//
// Every interaction ends in one of three states: ignored (not a command, or
// an unknown name), dispatched (handler ran cleanly), or failed (handler
// returned an error). Failures are contained here: the user gets a generic
// ephemeral reply, operators get the real error in the logs, and nothing
// propagates back into the gateway client.

use super::command_registry::{CommandError, CommandRegistry};
use async_trait::async_trait;
use std::sync::Arc;

/// The only message users ever see when a command fails.
pub const GENERIC_FAILURE_REPLY: &str = "There was an error while executing this command!";

/// What the dispatcher needs to know about an inbound interaction.
#[async_trait]
pub trait InteractionContext: Send + Sync {
    /// Name of the invoked command, or `None` if this is not a command interaction.
    fn command_name(&self) -> Option<&str>;

    /// Reply through the interaction's own channel, visible only to the invoker.
    async fn reply_ephemeral(&self, content: &str) -> Result<(), CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored,
    Dispatched,
    Failed,
}

pub struct CommandDispatcher<I: InteractionContext> {
    registry: Arc<CommandRegistry<I>>,
}

impl<I: InteractionContext> CommandDispatcher<I> {
    pub fn new(registry: Arc<CommandRegistry<I>>) -> Self {
        Self { registry }
    }

    pub async fn dispatch(&self, interaction: &I) -> DispatchOutcome {
        let Some(name) = interaction.command_name() else {
            return DispatchOutcome::Ignored;
        };

        let Some(command) = self.registry.get(name) else {
            tracing::debug!(command = %name, "No handler registered, ignoring interaction");
            return DispatchOutcome::Ignored;
        };

        match command.execute(interaction).await {
            Ok(()) => DispatchOutcome::Dispatched,
            Err(err) => {
                tracing::error!(command = %name, "Command failed: {}", err);

                if let Err(reply_err) = interaction.reply_ephemeral(GENERIC_FAILURE_REPLY).await {
                    tracing::error!(command = %name, "Failed to send error reply: {}", reply_err);
                }

                DispatchOutcome::Failed
            }
        }
    }
}
