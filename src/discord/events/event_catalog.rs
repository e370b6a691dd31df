// Discord event modules.
// Each module binds one handler to one named channel on the event bus; the
// catalog below is the binding order.

pub mod external_source_ready;
pub mod interaction_create;
pub mod ready;

use crate::core::commands::CommandDispatcher;
use crate::core::events::EventModule;
use crate::discord::gateway::BotEvent;
use crate::discord::interaction::GatewayInteraction;
use crate::discord::SharedConfiguration;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub fn all_events(
    configuration: SharedConfiguration,
    dispatcher: Arc<CommandDispatcher<GatewayInteraction>>,
    fatal: UnboundedSender<anyhow::Error>,
) -> Vec<Arc<dyn EventModule<BotEvent>>> {
    vec![
        Arc::new(ready::ReadyEvent::new(Arc::clone(&configuration), fatal)),
        Arc::new(interaction_create::InteractionCreateEvent::new(dispatcher)),
        Arc::new(external_source_ready::ExternalSourceReadyEvent::new(configuration)),
    ]
}
