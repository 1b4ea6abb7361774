//! Subscriber registry
//!
//! Each mounted UI surface registers a callback and receives a full
//! [`PlaybackState`] snapshot on every change. Dispatch is synchronous and
//! follows registration order, so all subscribers observe the same
//! sequence of snapshots.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Callback invoked with each new state snapshot
pub type Subscriber = Box<dyn FnMut(&PlaybackState)>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw id, for handing across FFI boundaries
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Ordered set of subscribers
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl SubscriberRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber; it is notified after all earlier ones
    pub fn insert(&mut self, subscriber: Subscriber) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Unknown or already-removed ids are ignored.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < before
    }

    /// Invoke every subscriber once, in registration order
    pub fn dispatch(&mut self, snapshot: &PlaybackState) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(snapshot);
        }
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscriber is registered
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Subscriber {
        let log = Rc::clone(log);
        Box::new(move |_: &PlaybackState| log.borrow_mut().push(name))
    }

    #[test]
    fn dispatch_follows_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SubscriberRegistry::new();
        registry.insert(recorder(&log, "player-bar"));
        registry.insert(recorder(&log, "now-playing"));
        registry.insert(recorder(&log, "track-list"));

        registry.dispatch(&PlaybackState::default());

        assert_eq!(*log.borrow(), vec!["player-bar", "now-playing", "track-list"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SubscriberRegistry::new();
        let id = registry.insert(recorder(&log, "a"));
        registry.insert(recorder(&log, "b"));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 1);

        registry.dispatch(&PlaybackState::default());
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = SubscriberRegistry::new();
        let first = registry.insert(Box::new(|_: &PlaybackState| {}));
        registry.remove(first);
        let second = registry.insert(Box::new(|_: &PlaybackState| {}));
        assert_ne!(first, second);
        assert!(!registry.is_empty());
    }
}
