//! # Event Bus
//!
//! Central event distribution system for decoupled communication
//! between the storefront state and its views using the observer pattern.
//!
//! Dispatch is synchronous and re-entrant: handlers run on the publisher's
//! call stack, in registration order, and may publish further events or
//! change subscriptions while they run. A publish works on a snapshot of the
//! registrations taken when it starts, so handlers added during a publish
//! only see later events.

use super::selector::EventSelector;
use super::shop_events::ShopEvent;
use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

/// Type alias for event handlers to reduce complexity
pub type EventHandler = Rc<dyn Fn(&ShopEvent) -> Result<()>>;

/// Handle returned by `subscribe`, needed to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One or more handlers failed during a publish.
///
/// Every matching handler still ran; `source` is the first failure.
#[derive(Debug, Error)]
#[error("{failures} handler(s) failed while publishing '{event}'")]
pub struct PublishError {
    pub event: &'static str,
    pub failures: usize,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

/// Event bus for decoupled communication between components
pub trait EventBus {
    /// Register a handler for every event the selector matches
    fn subscribe(&self, selector: EventSelector, handler: EventHandler) -> SubscriptionId;

    /// Remove a registration. Returns false if it was not present.
    fn unsubscribe(&self, selector: &EventSelector, id: SubscriptionId) -> bool;

    /// Deliver an event to every matching handler
    fn publish(&self, event: &ShopEvent) -> Result<(), PublishError>;

    /// Subscribe a closure without boxing it first
    fn on<S, F>(&self, selector: S, handler: F) -> SubscriptionId
    where
        Self: Sized,
        S: Into<EventSelector>,
        F: Fn(&ShopEvent) -> Result<()> + 'static,
    {
        self.subscribe(selector.into(), Rc::new(handler))
    }
}

struct Registration {
    id: SubscriptionId,
    selector: EventSelector,
    handler: EventHandler,
}

/// Simple in-memory event bus implementation
pub struct SimpleEventBus {
    registrations: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self {
            registrations: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Number of live registrations
    pub fn handler_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for SimpleEventBus {
    fn subscribe(&self, selector: EventSelector, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        tracing::debug!("Subscribing {:?} to {}", id, selector);
        self.registrations.borrow_mut().push(Registration {
            id,
            selector,
            handler,
        });
        id
    }

    fn unsubscribe(&self, selector: &EventSelector, id: SubscriptionId) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| !(r.id == id && &r.selector == selector));
        before != registrations.len()
    }

    fn publish(&self, event: &ShopEvent) -> Result<(), PublishError> {
        let name = event.name();

        // Snapshot so handlers can publish or (un)subscribe without a borrow conflict
        let handlers: Vec<EventHandler> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.selector.matches(name))
            .map(|r| Rc::clone(&r.handler))
            .collect();

        tracing::trace!("Publishing '{}' to {} handler(s)", name, handlers.len());

        let mut failures = 0;
        let mut first_error = None;
        for handler in handlers {
            if let Err(e) = handler(event) {
                tracing::error!("Handler for '{}' failed: {:#}", name, e);
                failures += 1;
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(PublishError {
                event: name,
                failures,
                source: e.into(),
            }),
        }
    }
}
