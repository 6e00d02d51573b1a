//! # Reactive Model Base
//!
//! Wraps a plain data aggregate together with the event bus it reports to.
//! Data is borrowed only for the duration of a `read`/`update` closure, never
//! across a publish, so handlers reacting to a change may call back into the
//! model that emitted it.

use crate::shop::events::{EventBus, ShopEvent};
use std::cell::RefCell;
use std::rc::Rc;

pub struct Model<T> {
    data: RefCell<T>,
    events: Rc<dyn EventBus>,
}

impl<T> Model<T> {
    pub fn new(data: T, events: Rc<dyn EventBus>) -> Self {
        Self {
            data: RefCell::new(data),
            events,
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.data.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.data.borrow_mut())
    }

    /// Publish a change event built from the current data.
    ///
    /// The closure picks the relevant data and merges in whatever the caller
    /// captured. Handler failures are logged, not returned.
    pub fn emit_changes(&self, build: impl FnOnce(&T) -> ShopEvent) {
        let event = self.read(build);
        if let Err(e) = self.events.publish(&event) {
            tracing::warn!("Change notification '{}' failed: {:#}", event.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::events::SimpleEventBus;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn emit_changes_should_publish_event_built_from_data() {
        let bus = Rc::new(SimpleEventBus::new());
        let received = Rc::new(RefCell::new(Vec::new()));
        let received_clone = received.clone();
        bus.on("basket:changed", move |event| {
            received_clone.borrow_mut().push(event.clone());
            Ok(())
        });

        let model = Model::new(vec!["a".to_string()], bus);
        let extra = "b".to_string();
        model.emit_changes(|items| {
            let mut item_ids = items.clone();
            item_ids.push(extra);
            ShopEvent::BasketChanged { item_ids }
        });

        assert_eq!(
            *received.borrow(),
            vec![ShopEvent::BasketChanged {
                item_ids: vec!["a".into(), "b".into()]
            }]
        );
    }

    #[test]
    fn handlers_should_be_able_to_read_model_during_emit() {
        let bus = Rc::new(SimpleEventBus::new());
        let model = Rc::new(Model::new(3u32, bus.clone()));
        let seen = Rc::new(Cell::new(0));

        let model_clone = Rc::clone(&model);
        let seen_clone = seen.clone();
        bus.on("loading:changed", move |_| {
            model_clone.update(|n| *n += 1);
            seen_clone.set(model_clone.read(|n| *n));
            Ok(())
        });

        model.emit_changes(|_| ShopEvent::LoadingChanged { loading: true });
        assert_eq!(seen.get(), 4);
    }

    #[test]
    fn emit_changes_should_swallow_handler_failures() {
        let bus = Rc::new(SimpleEventBus::new());
        bus.on("loading:changed", |_| Err(anyhow!("view is gone")));

        let model = Model::new((), bus);
        model.emit_changes(|_| ShopEvent::LoadingChanged { loading: false });
        model.update(|_| ());
    }
}
