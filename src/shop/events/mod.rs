//! # Events Module
//!
//! Re-exports all event system components: the bus, subscription
//! selectors and the typed storefront events.

pub mod event_bus;
pub mod selector;
pub mod shop_events;

// Re-export all types for easy access
pub use event_bus::{EventBus, EventHandler, PublishError, SimpleEventBus, SubscriptionId};
pub use selector::EventSelector;
pub use shop_events::{names, ShopEvent};
