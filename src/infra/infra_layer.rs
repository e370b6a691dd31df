// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "configuration/mod.rs"]
pub mod configuration;

#[path = "discord_api/mod.rs"]
pub mod discord_api;
