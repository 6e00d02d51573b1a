//! # Application State
//!
//! Holds the catalog, the basket/order and the validation errors, and keeps
//! them consistent. Mutations that the view layer cares about are announced
//! on the event bus.
//!
//! Basket toggles do not notify on their own: callers follow a toggle (or a
//! batch of them) with `set_basket` so a logical action produces one
//! `basket:changed`.

use crate::shop::events::{EventBus, ShopEvent};
use crate::shop::models::{CheckoutStep, Model, Order, OrderField, Product, ValidationErrors};
use std::rc::Rc;

/// Plain data behind `AppState`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppData {
    pub catalog: Vec<Product>,
    /// Basket snapshot last announced to the views
    pub basket: Vec<String>,
    pub order: Order,
    /// Id of the product shown in the detail view
    pub preview: Option<String>,
    pub loading: bool,
    pub form_errors: ValidationErrors,
}

pub struct AppState {
    model: Model<AppData>,
}

impl AppState {
    pub fn new(events: Rc<dyn EventBus>) -> Self {
        Self {
            model: Model::new(AppData::default(), events),
        }
    }

    pub fn catalog(&self) -> Vec<Product> {
        self.model.read(|d| d.catalog.clone())
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.model
            .read(|d| d.catalog.iter().find(|p| p.id == id).cloned())
    }

    pub fn basket(&self) -> Vec<String> {
        self.model.read(|d| d.basket.clone())
    }

    pub fn order(&self) -> Order {
        self.model.read(|d| d.order.clone())
    }

    pub fn order_items(&self) -> Vec<String> {
        self.model.read(|d| d.order.items.clone())
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.model.read(|d| d.order.contains(id))
    }

    pub fn preview(&self) -> Option<String> {
        self.model.read(|d| d.preview.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.model.read(|d| d.loading)
    }

    pub fn form_errors(&self) -> ValidationErrors {
        self.model.read(|d| d.form_errors.clone())
    }

    /// Put an id into the order (once) or take every occurrence out
    pub fn toggle_ordered_item(&self, id: &str, included: bool) {
        let changed = self.model.update(|d| {
            if included {
                d.order.include(id)
            } else {
                d.order.exclude(id)
            }
        });
        tracing::debug!("Toggled item {} (included={}, changed={})", id, included, changed);
    }

    /// Remove every item through the toggle path
    pub fn clear_basket(&self) {
        for id in self.order_items() {
            self.toggle_ordered_item(&id, false);
        }
    }

    /// Sum of catalog prices for the ordered ids. Unknown ids and priceless
    /// products count as zero.
    pub fn total(&self) -> u64 {
        self.model.read(|d| {
            d.order
                .items
                .iter()
                .filter_map(|id| d.catalog.iter().find(|p| &p.id == id))
                .map(Product::price_or_zero)
                .sum()
        })
    }

    /// Store the current total on the order record
    pub fn refresh_order_total(&self) -> u64 {
        let total = self.total();
        self.model.update(|d| d.order.total = total);
        total
    }

    pub fn clear_order_total(&self) {
        self.model.update(|d| d.order.total = 0);
    }

    pub fn set_catalog(&self, products: Vec<Product>) {
        tracing::debug!("Catalog replaced with {} products", products.len());
        self.model.update(|d| d.catalog = products);
        self.model.emit_changes(|d| ShopEvent::CatalogChanged {
            catalog: d.catalog.clone(),
        });
    }

    pub fn set_preview(&self, product: &Product) {
        self.model.update(|d| d.preview = Some(product.id.clone()));
        self.model.emit_changes(|_| ShopEvent::PreviewChanged {
            product: product.clone(),
        });
    }

    pub fn set_basket(&self, items: Vec<String>) {
        self.model.update(|d| d.basket = items);
        self.model.emit_changes(|d| ShopEvent::BasketChanged {
            item_ids: d.basket.clone(),
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.model.update(|d| d.loading = loading);
        self.model
            .emit_changes(|d| ShopEvent::LoadingChanged { loading: d.loading });
    }

    /// Write a field, validate `step`, and announce `order:ready` when the
    /// step passes. Returns the validation result.
    pub fn set_order_field(&self, field: OrderField, value: &str, step: CheckoutStep) -> bool {
        self.model.update(|d| d.order.set_field(field, value));

        let valid = self.validate_order(step);
        if valid {
            self.model.emit_changes(|d| ShopEvent::OrderReady {
                order: d.order.clone(),
            });
        }
        valid
    }

    /// Recompute the errors of `step` and announce the full error map.
    ///
    /// Entries belonging to the other step are left as they were.
    pub fn validate_order(&self, step: CheckoutStep) -> bool {
        let valid = self.model.update(|d| {
            let errors = step.validate(&d.order);
            let valid = errors.is_empty();
            d.form_errors.replace_step(step, errors);
            valid
        });
        tracing::debug!("Validated step '{}': valid={}", step, valid);

        self.model.emit_changes(|d| ShopEvent::ValidationChanged {
            errors: d.form_errors.clone(),
        });
        valid
    }
}
