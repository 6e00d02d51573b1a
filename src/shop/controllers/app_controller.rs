//! # Storefront Application Controller
//!
//! The controller owns the event bus, the application state and the API
//! client. It wires UI intent events to state mutations at startup and runs
//! the two asynchronous operations: loading the catalog and submitting the
//! order.
//!
//! Intents are handled synchronously on the bus. `order:submit` only queues
//! the submission; `dispatch` performs queued work after the publish returns,
//! and the results re-enter the bus as ordinary events.

use crate::config::ShopConfig;
use crate::shop::app_state::AppState;
use crate::shop::events::{
    names, EventBus, EventSelector, ShopEvent, SimpleEventBus, SubscriptionId,
};
use crate::shop::models::{CheckoutStep, OrderField};
use crate::shop::services::{ApiError, OrderResult, ShopApi};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Pattern for every form-field edit, across both checkout steps
pub const FIELD_CHANGE_PATTERN: &str = r"^(order|payment):.*change$";

/// Work that has to wait for the current publish to finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    SubmitOrder,
}

/// The main application controller that wires state, bus and API together
pub struct AppController {
    events: Rc<SimpleEventBus>,
    state: Rc<AppState>,
    api: ShopApi,
    pending: Rc<RefCell<VecDeque<PendingAction>>>,
    subscriptions: Vec<(EventSelector, SubscriptionId)>,
}

impl AppController {
    /// Create a controller talking to the configured endpoints
    pub fn new(config: &ShopConfig) -> Result<Self> {
        Self::with_api(ShopApi::new(config)?)
    }

    /// Create a controller around an existing API client
    pub fn with_api(api: ShopApi) -> Result<Self> {
        let events = Rc::new(SimpleEventBus::new());
        let state = Rc::new(AppState::new(events.clone()));

        let mut controller = Self {
            events,
            state,
            api,
            pending: Rc::new(RefCell::new(VecDeque::new())),
            subscriptions: Vec::new(),
        };
        controller.register_handlers()?;
        Ok(controller)
    }

    pub fn events(&self) -> &Rc<SimpleEventBus> {
        &self.events
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn subscribe<F>(&mut self, selector: EventSelector, handler: F)
    where
        F: Fn(&ShopEvent) -> Result<()> + 'static,
    {
        let id = self.events.on(selector.clone(), handler);
        self.subscriptions.push((selector, id));
    }

    /// Connect intent events to state mutations
    fn register_handlers(&mut self) -> Result<()> {
        let state = Rc::clone(&self.state);
        self.subscribe(names::BASKET_ADD.into(), move |event| {
            if let ShopEvent::BasketAdd { product } = event {
                state.toggle_ordered_item(&product.id, true);
                state.set_basket(state.order_items());
            }
            Ok(())
        });

        let state = Rc::clone(&self.state);
        self.subscribe(names::BASKET_REMOVE.into(), move |event| {
            if let ShopEvent::BasketRemove { id } = event {
                state.toggle_ordered_item(id, false);
                state.set_basket(state.order_items());
            }
            Ok(())
        });

        let state = Rc::clone(&self.state);
        self.subscribe(names::BASKET_CLEAR.into(), move |_| {
            state.clear_basket();
            state.set_basket(state.order_items());
            Ok(())
        });

        let state = Rc::clone(&self.state);
        self.subscribe(names::CARD_SELECT.into(), move |event| {
            if let ShopEvent::CardSelect { product } = event {
                state.set_preview(product);
            }
            Ok(())
        });

        let state = Rc::clone(&self.state);
        self.subscribe(EventSelector::pattern(FIELD_CHANGE_PATTERN)?, move |event| {
            let step = match event {
                ShopEvent::OrderFieldChange { field, value, step } => {
                    state.set_order_field(*field, value, *step);
                    *step
                }
                ShopEvent::PaymentChange { payment } => {
                    state.set_order_field(
                        OrderField::Payment,
                        payment,
                        CheckoutStep::PaymentAddress,
                    );
                    CheckoutStep::PaymentAddress
                }
                _ => return Ok(()),
            };
            if step == CheckoutStep::PaymentAddress {
                state.refresh_order_total();
            }
            Ok(())
        });

        let pending = Rc::clone(&self.pending);
        self.subscribe(names::ORDER_SUBMIT.into(), move |_| {
            pending.borrow_mut().push_back(PendingAction::SubmitOrder);
            Ok(())
        });

        tracing::debug!("Registered {} intent handlers", self.subscriptions.len());
        Ok(())
    }

    /// Publish an intent and carry out any work it queued.
    ///
    /// Queued work always runs. A handler failure is reported first, then
    /// the first failure of the queued work.
    pub async fn dispatch(&self, event: ShopEvent) -> Result<()> {
        tracing::debug!("Dispatching '{}'", event.name());
        if !event.is_intent() {
            tracing::warn!("'{}' is a state notification, not a user intent", event.name());
        }
        let published = self.events.publish(&event);
        let pending = self.run_pending().await;
        published?;
        pending
    }

    async fn run_pending(&self) -> Result<()> {
        let mut first_error = None;
        loop {
            // Keep the borrow out of the awaited section
            let next = self.pending.borrow_mut().pop_front();
            let Some(action) = next else { break };
            match action {
                PendingAction::SubmitOrder => {
                    if let Err(e) = self.submit_order().await {
                        first_error.get_or_insert(
                            anyhow::Error::from(e).context("Order submission failed"),
                        );
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Fetch the catalog into state. Failures are logged and leave the
    /// current catalog in place.
    pub async fn load_catalog(&self) {
        self.state.set_loading(true);
        match self.api.fetch_catalog().await {
            Ok(products) => {
                tracing::info!("Catalog loaded: {} products", products.len());
                self.state.set_catalog(products);
            }
            Err(e) => tracing::error!("Failed to load catalog: {}", e),
        }
        self.state.set_loading(false);
    }

    /// Send the current order. On success the basket is cleared and the
    /// completion is announced; on failure the order stays as it is.
    pub async fn submit_order(&self) -> Result<OrderResult, ApiError> {
        self.state.refresh_order_total();
        let order = self.state.order();

        match self.api.submit_order(&order).await {
            Ok(result) => {
                tracing::info!("Order {} accepted, total {}", result.id, order.total);
                self.complete_order(&result, order.total);
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Failed to submit order: {}", e);
                Err(e)
            }
        }
    }

    fn complete_order(&self, result: &OrderResult, submitted_total: u64) {
        let completed = ShopEvent::OrderCompleted {
            id: result.id.clone(),
            total: result.total.unwrap_or(submitted_total),
        };
        if let Err(e) = self.events.publish(&completed) {
            tracing::warn!("Order completion notification failed: {:#}", e);
        }

        self.state.clear_basket();
        self.state.clear_order_total();
        self.state.set_basket(self.state.order_items());
    }

    /// Add a product the way the preview card's button does: it shows the
    /// product, then adds it unless it is priceless or already in the basket.
    pub async fn add_from_preview(&self, id: &str) -> Result<bool> {
        let Some(product) = self.state.product(id) else {
            tracing::warn!("Product {} is not in the catalog", id);
            return Ok(false);
        };

        self.dispatch(ShopEvent::CardSelect {
            product: product.clone(),
        })
        .await?;

        if product.is_priceless() {
            tracing::warn!("Product {} is priceless and cannot be bought", id);
            return Ok(false);
        }
        if self.state.contains_item(id) {
            tracing::warn!("Product {} is already in the basket", id);
            return Ok(false);
        }

        self.dispatch(ShopEvent::BasketAdd { product }).await?;
        Ok(true)
    }

    /// Detach every handler this controller registered
    pub fn shutdown(&mut self) {
        for (selector, id) in self.subscriptions.drain(..) {
            self.events.unsubscribe(&selector, id);
        }
        tracing::debug!("Controller handlers detached");
    }
}
