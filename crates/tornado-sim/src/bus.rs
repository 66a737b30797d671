//! Upgrade event bus.
//!
//! Subscribers receive a handle on subscribe and collect published events in
//! a private inbox until they drain it. Unsubscribing drops the inbox.

use std::collections::{BTreeMap, VecDeque};

use tornado_core::events::UpgradeEvent;
use tornado_core::types::SubscriptionId;

#[derive(Debug, Default)]
pub struct UpgradeBus {
    next_id: u32,
    inboxes: BTreeMap<SubscriptionId, VecDeque<UpgradeEvent>>,
}

impl UpgradeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.inboxes.insert(id, VecDeque::new());
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inboxes.remove(&id).is_some()
    }

    /// Deliver `event` to every subscriber. Returns the number of recipients.
    pub fn publish(&mut self, event: UpgradeEvent) -> usize {
        for inbox in self.inboxes.values_mut() {
            inbox.push_back(event);
        }
        self.inboxes.len()
    }

    /// Take all pending events for `id`, oldest first.
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<UpgradeEvent> {
        self.inboxes
            .get_mut(&id)
            .map(|inbox| inbox.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inboxes.len()
    }
}
