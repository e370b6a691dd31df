// Discord commands module.
// Each command gets its own file; the catalog below is the load order.

pub mod configuration;

pub mod ping;

// Bot presence management
pub mod presence;

use crate::core::commands::SlashCommand;
use crate::discord::interaction::GatewayInteraction;
use crate::discord::SharedConfiguration;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Every slash command the bot serves, in the order their schemas are published.
pub fn all_commands(
    started_at: DateTime<Utc>,
    configuration: SharedConfiguration,
) -> Vec<Arc<dyn SlashCommand<GatewayInteraction>>> {
    vec![
        Arc::new(ping::PingCommand::new(started_at)),
        Arc::new(configuration::ConfigurationCommand::new(configuration)),
    ]
}
