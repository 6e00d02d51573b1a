//! # Storefront Module
//!
//! The reactive core of the storefront and the pieces that surround it:
//!
//! - **events**: synchronous publish/subscribe bus with exact and pattern selectors
//! - **models**: products, orders, validation rules and the reactive model base
//! - **app_state**: basket, catalog and checkout state, and the validation engine
//! - **services**: the remote catalog/order API
//! - **controllers**: startup wiring of intents to state, and the async calls
//! - **views**: text rendering of derived events

pub mod app_state;
pub mod controllers;
pub mod events;
pub mod models;
pub mod services;
pub mod views;

// Re-export main types for convenience
pub use app_state::{AppData, AppState};
pub use controllers::AppController;
pub use events::{EventBus, EventSelector, ShopEvent, SimpleEventBus};
pub use models::{CheckoutStep, Order, OrderField, Product, ValidationErrors};
pub use services::{ApiError, OrderResult, ShopApi};
pub use views::{attach_view, ConsoleRenderer, ViewRenderer};
