//! Cart commands, all backed by the session's local mirror.

use anyhow::Result;
use dialoguer::Confirm;

use harvest_commerce::ids::{CartItemId, ProductId};
use harvest_session::CartSession;

use super::{CartArgs, CartCommand, Friendly};
use crate::context::Context;

const WIDTHS: &[usize] = &[6, 28, 4, 12, 12];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut session = CartSession::open(ctx.client.clone()).friendly()?;

    match args.command {
        CartCommand::Show => show(&mut session, ctx).await,
        CartCommand::Add { product_id } => add(ProductId::new(product_id), &mut session, ctx).await,
        CartCommand::Increase { item_id } => {
            increase(CartItemId::new(item_id), &mut session, ctx).await
        }
        CartCommand::Decrease { item_id } => {
            decrease(CartItemId::new(item_id), &mut session, ctx).await
        }
        CartCommand::Remove { item_id, yes } => {
            remove(CartItemId::new(item_id), yes, &mut session, ctx).await
        }
        CartCommand::Check { product_id } => check(ProductId::new(product_id), &session, ctx).await,
    }
}

async fn show(session: &mut CartSession, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading cart...");
    let result = session.refresh().await;
    spinner.finish_and_clear();
    result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(session.cart());
        return Ok(());
    }

    if session.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.header("Your cart");
    ctx.output
        .table_row(&["ITEM", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], WIDTHS);
    for item in &session.cart().cartitems {
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.product.name,
                &item.quantity.to_string(),
                &item.product.price.display(),
                &item.sub_total.display(),
            ],
            WIDTHS,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Total", &session.total().display());
    ctx.output.debug(&format!("cart code {}", session.code()));
    Ok(())
}

async fn add(product: ProductId, session: &mut CartSession, ctx: &Context) -> Result<()> {
    // The backend creates a fresh line on every add, so duplicates are
    // prevented here the way the storefront disables its button.
    if session.contains(product).await.friendly()? {
        ctx.output.info("Already in your cart.");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Adding to cart...");
    let result = session.add(product).await;
    spinner.finish_and_clear();
    let cart = result.friendly()?;

    let count = cart.item_count();
    ctx.output.success(&format!(
        "Added to cart ({} item{})",
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(())
}

async fn increase(item: CartItemId, session: &mut CartSession, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Updating cart...");
    let result = async {
        session.refresh().await?;
        session.increase(item).await
    }
    .await;
    spinner.finish_and_clear();
    result.friendly()?;

    report_line(item, session, ctx);
    Ok(())
}

async fn decrease(item: CartItemId, session: &mut CartSession, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Updating cart...");
    let result = async {
        session.refresh().await?;
        session.decrease(item).await
    }
    .await;
    spinner.finish_and_clear();
    result.friendly()?;

    report_line(item, session, ctx);
    Ok(())
}

async fn remove(item: CartItemId, yes: bool, session: &mut CartSession, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading cart...");
    let result = session.refresh().await;
    spinner.finish_and_clear();
    result.friendly()?;

    if !yes {
        let prompt = match session.cart().get_item(item) {
            Some(line) => format!("Remove {} from your cart?", line.product.name),
            None => format!("Remove item {} from your cart?", item),
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Removing...");
    let result = session.remove(item).await;
    spinner.finish_and_clear();
    let message = result.friendly()?;

    ctx.output.success(&message);
    Ok(())
}

async fn check(product: ProductId, session: &CartSession, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Checking...");
    let result = session.contains(product).await;
    spinner.finish_and_clear();
    let in_cart = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "in_cart": in_cart }));
        return Ok(());
    }

    if in_cart {
        ctx.output
            .success(&format!("Product {} is in your cart.", product));
    } else {
        ctx.output
            .info(&format!("Product {} is not in your cart.", product));
    }
    Ok(())
}

fn report_line(item: CartItemId, session: &CartSession, ctx: &Context) {
    if let Some(line) = session.cart().get_item(item) {
        ctx.output.success(&format!(
            "{} x{}, subtotal {}",
            line.product.name,
            line.quantity,
            line.sub_total.display()
        ));
    }
}
