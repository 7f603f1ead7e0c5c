//! Synchronous, kind-keyed event bus.

use std::collections::BTreeMap;

use super::types::{EventKind, GameEvent};

type Handler = Box<dyn FnMut(&GameEvent) + Send>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Routes each published event to the handlers subscribed to its kind.
///
/// Handlers run synchronously, in subscription order, before `publish`
/// returns.
#[derive(Default)]
pub struct EventBus {
    // BTreeMap keyed by a monotonically increasing id preserves subscription order.
    handlers: BTreeMap<SubscriptionId, (EventKind, Handler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.insert(id, (kind, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    pub fn publish(&mut self, event: &GameEvent) {
        let kind = event.kind();
        let mut delivered = 0usize;
        for (subscribed, handler) in self.handlers.values_mut() {
            if *subscribed == kind {
                handler(event);
                delivered += 1;
            }
        }
        tracing::trace!(%kind, delivered, "event published");
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.values().filter(|(k, _)| *k == kind).count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
