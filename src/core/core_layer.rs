// The core module contains all platform-agnostic logic.
// Each feature gets its own submodule.

#[path = "commands/mod.rs"]
pub mod commands;

#[path = "configuration/mod.rs"]
pub mod configuration;

#[path = "events/mod.rs"]
pub mod events;

#[path = "settings/mod.rs"]
pub mod settings;
