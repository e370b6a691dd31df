// Direct calls to the Discord REST API that the gateway framework does not cover.

pub mod command_publisher;

pub use command_publisher::DiscordCommandPublisher;
