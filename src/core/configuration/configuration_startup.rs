// Startup step run by the ready handler: seed the configuration table, then
// announce that the rows exist.
//
// The follow-up notification is only emitted after a successful seed. When
// the retry policy is exhausted the error goes out on `fatal` instead and
// nothing is emitted, so no follower ever reads a half-initialised table.

use super::configuration_service::{ConfigurationService, SeedReport};
use super::configuration_store::ConfigurationStore;
use crate::core::events::{EventBus, Notification};
use tokio::sync::mpsc::UnboundedSender;

pub async fn seed_then_signal<S, P>(
    configuration: &ConfigurationService<S>,
    bus: &EventBus<P>,
    follow_up: impl FnOnce() -> P,
    fatal: &UnboundedSender<anyhow::Error>,
) -> Option<SeedReport>
where
    S: ConfigurationStore,
    P: Notification,
{
    match configuration.seed().await {
        Ok(report) => {
            tracing::info!(
                inserted = report.inserted,
                attempts = report.attempts,
                "Initialized database"
            );
            bus.emit(&follow_up()).await;
            Some(report)
        }
        Err(err) => {
            tracing::error!("Configuration seeding failed, shutting down: {}", err);
            if fatal.send(anyhow::Error::new(err)).is_err() {
                tracing::error!("Startup failure could not be reported, receiver is gone");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::CommandError;
    use crate::core::configuration::configuration_models::ConfigurationKey;
    use crate::core::configuration::in_memory_store::InMemoryConfigurationStore;
    use crate::core::configuration::SeedPolicy;
    use crate::core::events::EventModule;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Signal;

    impl Notification for Signal {
        fn channel(&self) -> &str {
            "external_source_ready"
        }
    }

    #[derive(Default)]
    struct Follower {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventModule<Signal> for Follower {
        fn name(&self) -> &str {
            "external_source_ready"
        }

        async fn execute(&self, _: &Signal, _: &EventBus<Signal>) -> Result<(), CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn service(
        store: InMemoryConfigurationStore,
        max_attempts: u32,
    ) -> ConfigurationService<InMemoryConfigurationStore> {
        ConfigurationService::new(
            store,
            SeedPolicy {
                max_attempts,
                initial_delay: Duration::from_millis(1),
            },
        )
    }

    fn bus_with_follower() -> (EventBus<Signal>, Arc<Follower>) {
        let bus: EventBus<Signal> = EventBus::new();
        let follower = Arc::new(Follower::default());
        bus.bind(follower.clone());
        (bus, follower)
    }

    #[tokio::test]
    async fn successful_seed_emits_the_follow_up_once() {
        let configuration = service(InMemoryConfigurationStore::new(), 3);
        let (bus, follower) = bus_with_follower();
        let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();

        let report = seed_then_signal(&configuration, &bus, || Signal, &fatal_tx).await;

        assert_eq!(
            report.map(|r| r.inserted),
            Some(ConfigurationKey::ALL.len() as u64)
        );
        assert_eq!(follower.calls.load(Ordering::SeqCst), 1);
        assert!(fatal_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn seed_after_transient_failures_still_emits_once() {
        let configuration = service(InMemoryConfigurationStore::failing(2), 3);
        let (bus, follower) = bus_with_follower();
        let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();

        let report = seed_then_signal(&configuration, &bus, || Signal, &fatal_tx).await;

        assert_eq!(report.map(|r| r.attempts), Some(3));
        assert_eq!(follower.calls.load(Ordering::SeqCst), 1);
        assert!(fatal_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn exhausted_seed_reports_one_fatal_error_and_emits_nothing() {
        let configuration = service(InMemoryConfigurationStore::failing(u32::MAX), 3);
        let (bus, follower) = bus_with_follower();
        let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();

        let report = seed_then_signal(&configuration, &bus, || Signal, &fatal_tx).await;

        assert!(report.is_none());
        assert_eq!(follower.calls.load(Ordering::SeqCst), 0);
        assert_eq!(bus.listener_count("external_source_ready"), 1);

        let err = fatal_rx.try_recv().unwrap();
        assert!(err.to_string().contains("after 3 attempts"));
        assert!(fatal_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_fatal_receiver_does_not_panic() {
        let configuration = service(InMemoryConfigurationStore::failing(u32::MAX), 1);
        let (bus, follower) = bus_with_follower();
        let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();
        drop(fatal_rx);

        let report = seed_then_signal(&configuration, &bus, || Signal, &fatal_tx).await;
        assert!(report.is_none());
        assert_eq!(follower.calls.load(Ordering::SeqCst), 0);
    }
}
