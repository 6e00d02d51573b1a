//! # Shopline Main Entry Point
//!
//! Loads the catalog, replays the basket and checkout steps given on the
//! command line and optionally submits the order.

use anyhow::{bail, Context, Result};
use shopline::cmd_args::CommandLineArgs;
use shopline::config::ShopConfig;
use shopline::{attach_view, AppController, CheckoutStep, ConsoleRenderer, OrderField, ShopEvent};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "shopline=debug" } else { "shopline=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn fill_checkout(controller: &AppController, args: &CommandLineArgs) -> Result<()> {
    if let Some(payment) = args.payment() {
        controller
            .dispatch(ShopEvent::PaymentChange {
                payment: payment.to_string(),
            })
            .await?;
    }

    let fields = [
        (OrderField::Address, args.address(), CheckoutStep::PaymentAddress),
        (OrderField::Email, args.email(), CheckoutStep::Contact),
        (OrderField::Phone, args.phone(), CheckoutStep::Contact),
    ];
    for (field, value, step) in fields {
        let Some(value) = value else { continue };
        controller
            .dispatch(ShopEvent::OrderFieldChange {
                field,
                value: value.to_string(),
                step,
            })
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_logging(args.verbose());

    let config = ShopConfig::from_env().with_overrides(args.api_url(), args.cdn_url());
    tracing::debug!("Using API {} and CDN {}", config.api_url, config.cdn_url);

    let mut controller =
        AppController::new(&config).context("Failed to create storefront controller")?;
    attach_view(
        &**controller.events(),
        ConsoleRenderer::new(std::io::stdout()),
    )
    .context("Failed to attach console view")?;

    controller.load_catalog().await;

    if let Some(id) = args.preview() {
        match controller.state().product(id) {
            Some(product) => controller.dispatch(ShopEvent::CardSelect { product }).await?,
            None => tracing::warn!("Product {} is not in the catalog", id),
        }
    }

    for id in args.add() {
        controller.add_from_preview(id).await?;
    }

    fill_checkout(&controller, &args).await?;

    if args.submit() {
        let order = controller.state().order();
        if order.items.is_empty() {
            bail!("Basket is empty, nothing to submit");
        }
        for step in [CheckoutStep::PaymentAddress, CheckoutStep::Contact] {
            let errors = step.validate(&order);
            if !errors.is_empty() {
                bail!("Order is incomplete: {}", errors.summary());
            }
        }
        controller.dispatch(ShopEvent::OrderSubmit).await?;
    }

    controller.shutdown();
    Ok(())
}
