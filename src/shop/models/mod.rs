//! # Models
//!
//! Pure data for the storefront (products, orders, validation errors) and
//! the reactive model base the application state is built on.

pub mod model;
pub mod order;
pub mod product;

pub use model::Model;
pub use order::{CheckoutStep, FieldRule, Order, OrderField, ValidationErrors, PAYMENT_METHODS};
pub use product::{
    format_amount, format_price, CategoryKind, Product, CURRENCY_UNIT, PRICELESS_LABEL,
};
