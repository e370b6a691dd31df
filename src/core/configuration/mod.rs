pub mod configuration_models;
pub mod configuration_service;
pub mod configuration_startup;
pub mod configuration_store;
#[cfg(test)]
pub mod in_memory_store;

pub use configuration_models::ConfigurationEntry;
pub use configuration_service::{ConfigurationService, SeedPolicy};
pub use configuration_startup::seed_then_signal;
pub use configuration_store::{ConfigurationStore, StoreError};
