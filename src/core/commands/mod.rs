// Slash command plumbing: the registry built at startup, the dispatcher that
// routes interactions through it, and the contract for publishing schemas.

pub mod command_dispatcher;
pub mod command_publisher;
pub mod command_registry;

pub use command_dispatcher::{CommandDispatcher, InteractionContext};
pub use command_publisher::{publish_commands, CommandPublisher, PublishError};
pub use command_registry::{CommandError, CommandRegistry, SlashCommand};
