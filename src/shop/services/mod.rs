//! # Services Module
//!
//! Services handle external dependencies; today that is the remote shop API.

pub mod api;

pub use api::{ApiError, ApiListResponse, OrderResult, ShopApi};
