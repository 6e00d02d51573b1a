//! # Shopline - Headless Storefront
//!
//! Loads a product catalog, keeps a basket and walks an order through two
//! checkout steps (payment/address, then contacts) before submitting it to
//! the remote shop service.
//!
//! ## Architecture
//!
//! Everything hangs off a synchronous event bus:
//!
//! ```text
//! ┌─────────────┐  intent events  ┌──────────────┐   mutations   ┌──────────┐
//! │    View     │────────────────▶│  Controller  │──────────────▶│ AppState │
//! │             │                 │              │               │          │
//! │ - Rendering │◀────────────────┼──────────────┼───────────────│ - Basket │
//! │             │  derived events │ - Wiring     │               │ - Order  │
//! └─────────────┘                 │ - Async API  │               │ - Errors │
//!                                 └──────────────┘               └──────────┘
//!                                        │
//!                                        ▼
//!                                 ┌──────────────┐
//!                                 │   ShopApi    │
//!                                 └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod shop;

// Re-export main types for easy access
pub use shop::*;
