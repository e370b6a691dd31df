// Startup seeding for the configuration table.
//
// Seeding must guarantee that every known configuration key has a row before
// anything that reads configuration is started. A database that is briefly
// unavailable at boot is retried with exponential backoff; once the attempts
// run out the error goes back to the caller, which decides to stop the bot.

use super::configuration_models::{ConfigurationEntry, ConfigurationKey};
use super::configuration_store::{ConfigurationStore, StoreError};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Seeding failed after {attempts} attempts: {source}")]
    SeedExhausted {
        attempts: u32,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl SeedPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(1 << exponent)
    }
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows created by this run; zero when every key already existed.
    pub inserted: u64,
    pub attempts: u32,
}

pub struct ConfigurationService<S: ConfigurationStore> {
    store: S,
    policy: SeedPolicy,
}

impl<S: ConfigurationStore> ConfigurationService<S> {
    pub fn new(store: S, policy: SeedPolicy) -> Self {
        Self { store, policy }
    }

    /// Make sure a row exists for every [`ConfigurationKey`].
    pub async fn seed(&self) -> Result<SeedReport, ConfigurationError> {
        let names = ConfigurationKey::names();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.store.insert_missing(&names).await {
                Ok(inserted) => {
                    return Ok(SeedReport {
                        inserted,
                        attempts: attempt,
                    })
                }
                Err(err) if attempt < max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Configuration seeding failed, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(ConfigurationError::SeedExhausted {
                        attempts: attempt,
                        source: err,
                    })
                }
            }
        }
    }

    pub async fn entries(&self) -> Result<Vec<ConfigurationEntry>, ConfigurationError> {
        Ok(self.store.list().await?)
    }

    /// Known keys whose rows exist but have no value yet.
    pub async fn unset_keys(&self) -> Result<Vec<String>, ConfigurationError> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .filter(|entry| !entry.is_set())
            .map(|entry| entry.name)
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::configuration::in_memory_store::InMemoryConfigurationStore;

    fn fast_policy(max_attempts: u32) -> SeedPolicy {
        SeedPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn seeding_twice_keeps_one_row_per_key() {
        let service = ConfigurationService::new(InMemoryConfigurationStore::new(), fast_policy(1));

        let first = service.seed().await.unwrap();
        assert_eq!(first.inserted, ConfigurationKey::ALL.len() as u64);

        let second = service.seed().await.unwrap();
        assert_eq!(second.inserted, 0);

        let entries = service.entries().await.unwrap();
        assert_eq!(entries.len(), ConfigurationKey::ALL.len());
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let service =
            ConfigurationService::new(InMemoryConfigurationStore::failing(2), fast_policy(5));

        let report = service.seed().await.unwrap();
        assert_eq!(report.attempts, 3);
        assert_eq!(report.inserted, ConfigurationKey::ALL.len() as u64);
    }

    #[tokio::test]
    async fn exhausted_retries_return_an_error() {
        let service =
            ConfigurationService::new(InMemoryConfigurationStore::failing(10), fast_policy(3));

        match service.seed().await {
            Err(ConfigurationError::SeedExhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected SeedExhausted, got {:?}", other),
        }
        assert_eq!(service.store.calls(), 3);
    }

    #[tokio::test]
    async fn freshly_seeded_keys_are_all_unset() {
        let service = ConfigurationService::new(InMemoryConfigurationStore::new(), fast_policy(1));
        service.seed().await.unwrap();

        let unset = service.unset_keys().await.unwrap();
        assert_eq!(unset.len(), ConfigurationKey::ALL.len());
        assert!(unset.contains(&"SOURCEJUMP_API_URL".to_string()));
    }

    #[test]
    fn backoff_doubles() {
        let policy = SeedPolicy {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
        };

        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(4), Duration::from_millis(800));
    }
}
