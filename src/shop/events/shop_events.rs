//! # Shop Events
//!
//! Events that travel over the bus. Intent events come from the view layer
//! ("the user did something"), derived events come from the application state
//! ("something changed, re-render").

use crate::shop::models::{CheckoutStep, Order, OrderField, Product, ValidationErrors};

/// Wire names of every event, used by selectors
pub mod names {
    pub const BASKET_ADD: &str = "basket:add";
    pub const BASKET_REMOVE: &str = "basket:remove";
    pub const BASKET_CLEAR: &str = "basket:clear";
    pub const CARD_SELECT: &str = "card:select";
    pub const ORDER_FIELD_CHANGE: &str = "order:field-change";
    pub const PAYMENT_CHANGE: &str = "payment:change";
    pub const ORDER_SUBMIT: &str = "order:submit";

    pub const CATALOG_CHANGED: &str = "catalog:changed";
    pub const PREVIEW_CHANGED: &str = "preview:changed";
    pub const BASKET_CHANGED: &str = "basket:changed";
    pub const LOADING_CHANGED: &str = "loading:changed";
    pub const VALIDATION_CHANGED: &str = "validation:changed";
    pub const ORDER_READY: &str = "order:ready";
    pub const ORDER_COMPLETED: &str = "order:completed";
}

/// Every event the storefront publishes
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// User put a product into the basket
    BasketAdd { product: Product },

    /// User removed a product from the basket
    BasketRemove { id: String },

    /// User emptied the basket
    BasketClear,

    /// User opened a product card
    CardSelect { product: Product },

    /// User edited a checkout form field
    OrderFieldChange {
        field: OrderField,
        value: String,
        step: CheckoutStep,
    },

    /// User picked a payment method
    PaymentChange { payment: String },

    /// User confirmed the order
    OrderSubmit,

    /// Catalog was replaced
    CatalogChanged { catalog: Vec<Product> },

    /// Product shown in the detail view changed
    PreviewChanged { product: Product },

    /// Basket contents changed
    BasketChanged { item_ids: Vec<String> },

    /// Catalog fetch started or finished
    LoadingChanged { loading: bool },

    /// Validation errors were recomputed
    ValidationChanged { errors: ValidationErrors },

    /// Current checkout step is complete
    OrderReady { order: Order },

    /// Remote service accepted the order
    OrderCompleted { id: String, total: u64 },
}

impl ShopEvent {
    /// Name this event is published under
    pub fn name(&self) -> &'static str {
        match self {
            Self::BasketAdd { .. } => names::BASKET_ADD,
            Self::BasketRemove { .. } => names::BASKET_REMOVE,
            Self::BasketClear => names::BASKET_CLEAR,
            Self::CardSelect { .. } => names::CARD_SELECT,
            Self::OrderFieldChange { .. } => names::ORDER_FIELD_CHANGE,
            Self::PaymentChange { .. } => names::PAYMENT_CHANGE,
            Self::OrderSubmit => names::ORDER_SUBMIT,
            Self::CatalogChanged { .. } => names::CATALOG_CHANGED,
            Self::PreviewChanged { .. } => names::PREVIEW_CHANGED,
            Self::BasketChanged { .. } => names::BASKET_CHANGED,
            Self::LoadingChanged { .. } => names::LOADING_CHANGED,
            Self::ValidationChanged { .. } => names::VALIDATION_CHANGED,
            Self::OrderReady { .. } => names::ORDER_READY,
            Self::OrderCompleted { .. } => names::ORDER_COMPLETED,
        }
    }

    /// Whether this event expresses user intent rather than a state change
    pub fn is_intent(&self) -> bool {
        matches!(
            self,
            Self::BasketAdd { .. }
                | Self::BasketRemove { .. }
                | Self::BasketClear
                | Self::CardSelect { .. }
                | Self::OrderFieldChange { .. }
                | Self::PaymentChange { .. }
                | Self::OrderSubmit
        )
    }
}
