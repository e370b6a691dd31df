// Follower of the ready handler. By the time this fires every configuration
// row exists, so anything watching an external source can read its settings.
// We report which values an operator still has to fill in, in the logs and
// in the bot's presence.

use crate::core::commands::CommandError;
use crate::core::events::{EventBus, EventModule};
use crate::discord::commands::presence;
use crate::discord::gateway::{BotEvent, EXTERNAL_SOURCE_READY};
use crate::discord::SharedConfiguration;
use async_trait::async_trait;

pub struct ExternalSourceReadyEvent {
    configuration: SharedConfiguration,
}

impl ExternalSourceReadyEvent {
    pub fn new(configuration: SharedConfiguration) -> Self {
        Self { configuration }
    }
}

#[async_trait]
impl EventModule<BotEvent> for ExternalSourceReadyEvent {
    fn name(&self) -> &str {
        EXTERNAL_SOURCE_READY
    }

    async fn execute(&self, payload: &BotEvent, _bus: &EventBus<BotEvent>) -> Result<(), CommandError> {
        let BotEvent::ExternalSourceReady { ctx } = payload else {
            return Ok(());
        };

        let unset = self.configuration.unset_keys().await?;
        if unset.is_empty() {
            tracing::info!("All configuration values are set");
        } else {
            tracing::warn!(
                missing = %unset.join(", "),
                "Configuration values still need to be filled in"
            );
            presence::on_configuration_incomplete(ctx, unset.len());
        }
        Ok(())
    }
}
