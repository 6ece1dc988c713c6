// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Event dispatcher for sensor-to-consumer communication
//!
//! Delivery is synchronous and in-process. A handler must not call
//! [`EventDispatcher::publish`] on the dispatcher that is invoking it;
//! nothing guards against reentrant publishing.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ThermostatError;
use crate::sensors::Reading;

/// Event kinds raised by the threshold state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Reading at or above the warning level, below emergency
    ReachedWarning,
    /// First reading below the warning level after a warning
    FellBelowWarning,
    /// Reading at or above the emergency level
    ReachedEmergency,
}

impl EventKind {
    /// Alert label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::ReachedWarning => "Warning",
            EventKind::FellBelowWarning => "Information",
            EventKind::ReachedEmergency => "Emergency",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A state transition together with the reading that caused it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What happened
    pub kind: EventKind,
    /// Reading that triggered it
    pub reading: Reading,
}

impl Event {
    /// Pair an event kind with its reading
    pub fn new(kind: EventKind, reading: Reading) -> Self {
        Self { kind, reading }
    }
}

/// Subscriber callback
pub trait EventHandler: Send + Sync {
    /// React to a published event
    fn handle(&self, event: &Event) -> Result<()>;
}

impl<F> EventHandler for F
where
    F: Fn(&Event) -> Result<()> + Send + Sync,
{
    fn handle(&self, event: &Event) -> Result<()> {
        self(event)
    }
}

// Shared by every dispatcher so a handle only ever matches its own subscription
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(0);

/// Token returned by [`EventDispatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
    kind: EventKind,
}

impl SubscriptionHandle {
    /// Event kind the subscription listens to
    pub fn kind(&self) -> EventKind { self.kind }
}

/// Outcome of a single publish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that completed
    pub delivered: usize,
    /// Handlers that returned an error
    pub failed: usize,
}

struct Subscription {
    id: u64,
    handler: Arc<dyn EventHandler>,
}

/// Registry of handlers keyed by event kind
///
/// Handlers for one kind run in registration order. The caller keeps its own
/// `Arc` to each handler; unsubscribing hands the dispatcher's share back.
#[derive(Default)]
pub struct EventDispatcher {
    subscriptions: HashMap<EventKind, Vec<Subscription>>,
}

impl EventDispatcher {
    /// Empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind
    pub fn subscribe(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> SubscriptionHandle {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        self.subscriptions
            .entry(kind)
            .or_default()
            .push(Subscription { id, handler });
        debug!("Subscribed handler #{} to {}", id, kind);
        SubscriptionHandle { id, kind }
    }

    /// Remove a subscription; unknown handles are ignored
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> Option<Arc<dyn EventHandler>> {
        let list = self.subscriptions.get_mut(&handle.kind)?;
        let index = list.iter().position(|s| s.id == handle.id)?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.subscriptions.remove(&handle.kind);
        }
        debug!("Unsubscribed handler #{} from {}", handle.id, handle.kind);
        Some(removed.handler)
    }

    /// Deliver an event to every handler subscribed to its kind.
    ///
    /// A failing handler is logged and skipped; the rest still run.
    pub fn publish(&self, event: &Event) -> DispatchReport {
        let mut report = DispatchReport::default();
        let Some(list) = self.subscriptions.get(&event.kind) else {
            return report;
        };

        for subscription in list {
            match subscription.handler.handle(event) {
                Ok(()) => report.delivered += 1,
                Err(source) => {
                    report.failed += 1;
                    let failure = anyhow::Error::new(ThermostatError::HandlerFailure { kind: event.kind, source });
                    warn!("Handler #{} failed: {:#}", subscription.id, failure);
                }
            }
        }

        report
    }

    /// Number of handlers registered for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.get(&kind).map_or(0, Vec::len)
    }

    /// True when no handler is registered for any kind
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
