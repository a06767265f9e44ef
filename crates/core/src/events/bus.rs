// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for routing events to subscribers

use super::subscription::{SubscriberId, Subscription};
use crate::event::Event;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender for event delivery
pub type EventSender = mpsc::UnboundedSender<Event>;
/// Receiver for event delivery
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Routes events to every subscription whose patterns match.
///
/// Delivery is synchronous from the publisher's point of view: `publish`
/// returns once the event sits in each matching receiver's queue, so the
/// order subscribers observe is the order of `publish` calls.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<SubscriberId, (Subscription, EventSender)>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events matching the subscription's patterns
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = subscription.id.clone();

        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.insert(id, (subscription, tx));

        rx
    }

    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.remove(id);
    }

    /// Publish an event to all matching subscribers
    pub fn publish(&self, event: Event) {
        let name = event.name();
        let mut closed = Vec::new();

        {
            let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
            for (id, (subscription, tx)) in subs.iter() {
                if subscription.matches(&name) && tx.send(event.clone()).is_err() {
                    closed.push(id.clone());
                }
            }
        }

        // Receivers that were dropped no longer need events
        if !closed.is_empty() {
            let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
            for id in closed {
                subs.remove(&id);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
