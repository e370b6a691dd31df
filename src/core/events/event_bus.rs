// Named notification channels with one-shot and persistent subscriptions.
//
// The gateway layer turns every incoming event into a payload that knows its
// own channel name and emits it here. Event modules are bound once at startup
// in catalog order and fire in that order for each matching emit.

use crate::core::commands::CommandError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// A payload routed by channel name.
pub trait Notification: Send + Sync {
    fn channel(&self) -> &str;
}

/// A handler bound to one named channel.
#[async_trait]
pub trait EventModule<P: Notification>: Send + Sync {
    /// Channel this module listens on.
    fn name(&self) -> &str;

    /// One-shot modules fire for the next matching notification only.
    fn once(&self) -> bool {
        false
    }

    /// `bus` lets a handler emit follow-up notifications.
    async fn execute(&self, payload: &P, bus: &EventBus<P>) -> Result<(), CommandError>;
}

struct Subscription<P: Notification> {
    module: Arc<dyn EventModule<P>>,
    once: bool,
}

pub struct EventBus<P: Notification> {
    channels: DashMap<String, Vec<Subscription<P>>>,
}

impl<P: Notification> EventBus<P> {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe a module, honouring its `once` flag.
    pub fn bind(&self, module: Arc<dyn EventModule<P>>) {
        let once = module.once();
        let channel = module.name().to_string();
        tracing::debug!(%channel, once, "Binding event module");

        self.channels
            .entry(channel)
            .or_default()
            .push(Subscription { module, once });
    }

    pub fn bind_all(&self, modules: Vec<Arc<dyn EventModule<P>>>) {
        for module in modules {
            self.bind(module);
        }
    }

    /// Number of live subscriptions on a channel.
    pub fn listener_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map(|subs| subs.len()).unwrap_or(0)
    }

    /// Run every handler subscribed to the payload's channel, in binding order.
    ///
    /// One-shot subscriptions are removed before any handler runs, so a second
    /// emit racing with this one can never fire them again. Handler errors are
    /// logged and do not stop later handlers. Returns how many handlers fired.
    pub async fn emit(&self, payload: &P) -> usize {
        let channel = payload.channel();

        let fired: Vec<Arc<dyn EventModule<P>>> = match self.channels.get_mut(channel) {
            Some(mut subs) => {
                let fired = subs.iter().map(|sub| Arc::clone(&sub.module)).collect();
                subs.retain(|sub| !sub.once);
                fired
            }
            None => return 0,
        };

        for module in &fired {
            if let Err(err) = module.execute(payload, self).await {
                tracing::error!(%channel, "Event handler failed: {}", err);
            }
        }

        fired.len()
    }
}

impl<P: Notification> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Ping(&'static str);

    impl Notification for Ping {
        fn channel(&self) -> &str {
            self.0
        }
    }

    struct Counter {
        channel: &'static str,
        once: bool,
        calls: AtomicUsize,
    }

    impl Counter {
        fn new(channel: &'static str, once: bool) -> Arc<Self> {
            Arc::new(Self {
                channel,
                once,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventModule<Ping> for Counter {
        fn name(&self) -> &str {
            self.channel
        }

        fn once(&self) -> bool {
            self.once
        }

        async fn execute(&self, _: &Ping, _: &EventBus<Ping>) -> Result<(), CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventModule<Ping> for Recorder {
        fn name(&self) -> &str {
            "message"
        }

        async fn execute(&self, _: &Ping, _: &EventBus<Ping>) -> Result<(), CommandError> {
            self.log.lock().unwrap().push(self.label);
            if self.fail {
                return Err("recorder failed".into());
            }
            Ok(())
        }
    }

    /// Re-emits on another channel, the way the ready handler signals followers.
    struct Relay;

    #[async_trait]
    impl EventModule<Ping> for Relay {
        fn name(&self) -> &str {
            "ready"
        }

        fn once(&self) -> bool {
            true
        }

        async fn execute(&self, _: &Ping, bus: &EventBus<Ping>) -> Result<(), CommandError> {
            bus.emit(&Ping("follow_up")).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn once_subscription_fires_a_single_time() {
        let bus: EventBus<Ping> = EventBus::new();
        let ready = Counter::new("ready", true);
        bus.bind(ready.clone());

        assert_eq!(bus.emit(&Ping("ready")).await, 1);
        assert_eq!(bus.emit(&Ping("ready")).await, 0);
        assert_eq!(ready.calls(), 1);
        assert_eq!(bus.listener_count("ready"), 0);
    }

    #[tokio::test]
    async fn persistent_subscription_fires_every_time() {
        let bus: EventBus<Ping> = EventBus::new();
        let interactions = Counter::new("interaction_create", false);
        bus.bind(interactions.clone());

        for _ in 0..3 {
            bus.emit(&Ping("interaction_create")).await;
        }

        assert_eq!(interactions.calls(), 3);
        assert_eq!(bus.listener_count("interaction_create"), 1);
    }

    #[tokio::test]
    async fn other_channels_are_untouched() {
        let bus: EventBus<Ping> = EventBus::new();
        let ready = Counter::new("ready", true);
        bus.bind(ready.clone());

        assert_eq!(bus.emit(&Ping("guild_create")).await, 0);
        assert_eq!(ready.calls(), 0);
        assert_eq!(bus.listener_count("ready"), 1);
    }

    #[tokio::test]
    async fn handlers_run_in_binding_order_and_errors_do_not_stop_later_ones() {
        let bus: EventBus<Ping> = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.bind_all(vec![
            Arc::new(Recorder {
                label: "first",
                log: Arc::clone(&log),
                fail: true,
            }),
            Arc::new(Recorder {
                label: "second",
                log: Arc::clone(&log),
                fail: false,
            }),
        ]);

        assert_eq!(bus.emit(&Ping("message")).await, 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn handlers_can_emit_follow_up_notifications() {
        let bus: EventBus<Ping> = EventBus::new();
        let follower = Counter::new("follow_up", false);
        bus.bind(Arc::new(Relay));
        bus.bind(follower.clone());

        bus.emit(&Ping("ready")).await;
        bus.emit(&Ping("ready")).await;

        assert_eq!(follower.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_emits_fire_a_once_handler_exactly_once() {
        let bus = Arc::new(EventBus::<Ping>::new());
        let ready = Counter::new("ready", true);
        bus.bind(ready.clone());

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let bus = Arc::clone(&bus);
            tasks.push(tokio::spawn(async move { bus.emit(&Ping("ready")).await }));
        }

        let mut total = 0;
        for task in tasks {
            total += task.await.unwrap();
        }

        assert_eq!(total, 1);
        assert_eq!(ready.calls(), 1);
    }
}
