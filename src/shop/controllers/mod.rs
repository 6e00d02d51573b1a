//! # Controllers Module
//!
//! Contains the controller that wires the storefront together at startup.

pub mod app_controller;

// Re-export main types for convenience
pub use app_controller::{AppController, FIELD_CHANGE_PATTERN};
