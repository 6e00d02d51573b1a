//! # Views Module
//!
//! Contains the view layer: observers of derived events that render the
//! storefront for a terminal.

pub mod console_renderer;

// Re-export main types for convenience
pub use console_renderer::{attach_view, ConsoleRenderer, ViewRenderer};
