//! # Console View
//!
//! Renders the storefront as plain text. The view owns no state: it keeps a
//! copy of the last catalog it was shown so basket lines can carry titles and
//! prices, and everything else comes from event payloads.

use crate::shop::events::{EventBus, EventSelector, ShopEvent};
use crate::shop::models::{
    format_amount, format_price, Order, Product, ValidationErrors, CURRENCY_UNIT,
};
use anyhow::Result;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Selector covering every derived (state change) event
const DERIVED_EVENTS_PATTERN: &str = r":(changed|ready|completed)$";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Handle a derived event
    fn handle_event(&mut self, event: &ShopEvent) -> Result<()>;
}

/// Plain-text renderer writing to any `Write` sink
pub struct ConsoleRenderer<W: Write> {
    out: W,
    catalog: Vec<Product>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            catalog: Vec::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn render_catalog(&mut self, catalog: &[Product]) -> Result<()> {
        self.catalog = catalog.to_vec();
        writeln!(self.out, "Catalog: {} products", catalog.len())?;
        for product in catalog {
            writeln!(
                self.out,
                "  [{}] {} ({}) {}",
                product.id,
                product.title,
                product.category_kind().as_str(),
                format_price(product.price)
            )?;
        }
        Ok(())
    }

    fn render_preview(&mut self, product: &Product) -> Result<()> {
        writeln!(self.out, "> {}", product.title)?;
        writeln!(self.out, "  category: {}", product.category)?;
        if !product.description.is_empty() {
            writeln!(self.out, "  {}", product.description)?;
        }
        writeln!(self.out, "  {}", format_price(product.price))?;
        Ok(())
    }

    fn render_basket(&mut self, item_ids: &[String]) -> Result<()> {
        if item_ids.is_empty() {
            writeln!(self.out, "Basket is empty")?;
            return Ok(());
        }

        writeln!(self.out, "Basket ({}):", item_ids.len())?;
        let mut total = 0;
        let mut index = 0;
        for id in item_ids {
            // Ids the catalog no longer knows are skipped
            let Some(product) = self.catalog.iter().find(|p| &p.id == id) else {
                continue;
            };
            index += 1;
            total += product.price_or_zero();
            writeln!(
                self.out,
                "  {}. {}  {}",
                index,
                product.title,
                format_price(product.price)
            )?;
        }
        writeln!(self.out, "  Total: {} {}", format_amount(total), CURRENCY_UNIT)?;
        Ok(())
    }

    fn render_errors(&mut self, errors: &ValidationErrors) -> Result<()> {
        if errors.is_empty() {
            writeln!(self.out, "Form is valid")?;
        } else {
            writeln!(self.out, "Errors: {}", errors.summary())?;
        }
        Ok(())
    }

    fn render_ready(&mut self, order: &Order) -> Result<()> {
        writeln!(
            self.out,
            "Order ready: {} item(s), payment {}, deliver to {}",
            order.items.len(),
            order.payment,
            order.address
        )?;
        Ok(())
    }

    fn render_completed(&mut self, id: &str, total: u64) -> Result<()> {
        writeln!(
            self.out,
            "Order {} placed. Charged {} {}",
            id,
            format_amount(total),
            CURRENCY_UNIT
        )?;
        Ok(())
    }
}

impl<W: Write> ViewRenderer for ConsoleRenderer<W> {
    fn handle_event(&mut self, event: &ShopEvent) -> Result<()> {
        match event {
            ShopEvent::CatalogChanged { catalog } => self.render_catalog(catalog)?,
            ShopEvent::PreviewChanged { product } => self.render_preview(product)?,
            ShopEvent::BasketChanged { item_ids } => self.render_basket(item_ids)?,
            ShopEvent::LoadingChanged { loading: true } => {
                writeln!(self.out, "Loading catalog...")?
            }
            ShopEvent::ValidationChanged { errors } => self.render_errors(errors)?,
            ShopEvent::OrderReady { order } => self.render_ready(order)?,
            ShopEvent::OrderCompleted { id, total } => self.render_completed(id, *total)?,
            _ => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Subscribe a view to every derived event on the bus
pub fn attach_view<V>(bus: &dyn EventBus, view: V) -> Result<Rc<RefCell<V>>>
where
    V: ViewRenderer + 'static,
{
    let view = Rc::new(RefCell::new(view));
    let handle = Rc::clone(&view);
    bus.subscribe(
        EventSelector::pattern(DERIVED_EVENTS_PATTERN)?,
        Rc::new(move |event: &ShopEvent| handle.borrow_mut().handle_event(event)),
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::events::SimpleEventBus;
    use crate::shop::models::OrderField;

    fn product(id: &str, title: &str, price: Option<u64>) -> Product {
        Product {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            category: "софт-скил".into(),
            price,
        }
    }

    fn output(renderer: &ConsoleRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(renderer.writer()).to_string()
    }

    #[test]
    fn catalog_should_list_products_with_prices() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer
            .handle_event(&ShopEvent::CatalogChanged {
                catalog: vec![product("a", "Alpha", Some(1450)), product("b", "Beta", None)],
            })
            .unwrap();

        let text = output(&renderer);
        assert!(text.contains("Catalog: 2 products"));
        assert!(text.contains("[a] Alpha (soft) 1 450 synapses"));
        assert!(text.contains("[b] Beta (soft) Priceless"));
    }

    #[test]
    fn basket_should_number_items_and_skip_unknown_ids() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer
            .handle_event(&ShopEvent::CatalogChanged {
                catalog: vec![product("a", "Alpha", Some(750)), product("b", "Beta", Some(1450))],
            })
            .unwrap();
        renderer
            .handle_event(&ShopEvent::BasketChanged {
                item_ids: vec!["b".into(), "ghost".into(), "a".into()],
            })
            .unwrap();

        let text = output(&renderer);
        assert!(text.contains("  1. Beta  1 450 synapses"));
        assert!(text.contains("  2. Alpha  750 synapses"));
        assert!(text.contains("Total: 2 200 synapses"));
    }

    #[test]
    fn empty_basket_should_say_so() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer
            .handle_event(&ShopEvent::BasketChanged { item_ids: vec![] })
            .unwrap();
        assert_eq!(output(&renderer), "Basket is empty\n");
    }

    #[test]
    fn validation_should_render_summary_or_valid() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        let mut errors = ValidationErrors::new();
        errors.insert(OrderField::Address, "delivery address is required");
        renderer
            .handle_event(&ShopEvent::ValidationChanged { errors })
            .unwrap();
        renderer
            .handle_event(&ShopEvent::ValidationChanged {
                errors: ValidationErrors::new(),
            })
            .unwrap();

        assert_eq!(
            output(&renderer),
            "Errors: delivery address is required\nForm is valid\n"
        );
    }

    #[test]
    fn completion_should_report_charged_amount() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer
            .handle_event(&ShopEvent::OrderCompleted {
                id: "28c57cb4".into(),
                total: 2200,
            })
            .unwrap();
        assert_eq!(
            output(&renderer),
            "Order 28c57cb4 placed. Charged 2 200 synapses\n"
        );
    }

    #[test]
    fn attached_view_should_render_derived_events_only() {
        let bus = SimpleEventBus::new();
        let view = attach_view(&bus, ConsoleRenderer::new(Vec::new())).unwrap();

        bus.publish(&ShopEvent::BasketClear).unwrap();
        bus.publish(&ShopEvent::LoadingChanged { loading: true })
            .unwrap();
        bus.publish(&ShopEvent::BasketChanged { item_ids: vec![] })
            .unwrap();

        assert_eq!(
            output(&view.borrow()),
            "Loading catalog...\nBasket is empty\n"
        );
    }
}
