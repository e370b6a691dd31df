// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "events/event_catalog.rs"]
pub mod events;

pub mod gateway;
pub mod interaction;

use crate::core::configuration::ConfigurationService;
use crate::core::events::EventBus;
use crate::infra::configuration::SqliteConfigurationStore;
use gateway::BotEvent;
use std::sync::Arc;

pub type Error = crate::core::commands::CommandError;

pub type SharedConfiguration = Arc<ConfigurationService<SqliteConfigurationStore>>;

/// Data handed to the poise framework.
/// Everything else is owned by the command and event modules bound to the bus.
pub struct Data {
    pub events: Arc<EventBus<BotEvent>>,
}
