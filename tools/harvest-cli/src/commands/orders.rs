//! Order history and admin order management.

use anyhow::Result;
use dialoguer::Confirm;

use harvest_commerce::checkout::{Order, OrderStatus};
use harvest_commerce::ids::OrderId;
use harvest_commerce::page::{Page, ADMIN_ORDER_PAGE_SIZE, ORDER_PAGE_SIZE};

use super::{ensure_admin, ensure_signed_in, Friendly, OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::status_badge;

const WIDTHS: &[usize] = &[12, 12, 12, 6, 14];

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List { page } => list(page, ctx).await,
        OrdersCommand::All { page, status, sku } => all(page, status, sku, ctx).await,
        OrdersCommand::SetStatus { order_id, status } => {
            set_status(OrderId::new(order_id), &status, ctx).await
        }
        OrdersCommand::Delete { order_id, yes } => delete(OrderId::new(order_id), yes, ctx).await,
    }
}

async fn list(page: i64, ctx: &Context) -> Result<()> {
    ensure_signed_in(ctx, "orders list").await?;

    let spinner = ctx.output.spinner("Loading your orders...");
    let result = ctx.client.orders().mine(page).await;
    spinner.finish_and_clear();
    let orders = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Your orders");
    render_table(&orders.results, ctx);
    render_footer(&orders, page, ORDER_PAGE_SIZE, ctx);
    Ok(())
}

async fn all(page: i64, status: Option<String>, sku: Option<String>, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "orders all").await?;

    let spinner = ctx.output.spinner("Loading orders...");
    let result = match sku.as_deref() {
        Some(sku) => ctx.client.orders().find_by_sku(page, sku).await,
        None => {
            let status = parse_status_filter(status.as_deref())?;
            ctx.client.orders().all(page, status).await
        }
    };
    spinner.finish_and_clear();
    let orders = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("All orders");
    render_table(&orders.results, ctx);
    render_footer(&orders, page, ADMIN_ORDER_PAGE_SIZE, ctx);
    Ok(())
}

async fn set_status(id: OrderId, status: &str, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "orders set-status").await?;

    let status = OrderStatus::parse(status).friendly()?;

    let spinner = ctx.output.spinner("Updating order...");
    let result = ctx.client.orders().update_status(id, status).await;
    spinner.finish_and_clear();
    let order = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order {} is now {}",
        order.display_number(),
        status_badge(order.status)
    ));
    Ok(())
}

async fn delete(id: OrderId, yes: bool, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "orders delete").await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete order {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Deleting order...");
    let result = ctx.client.orders().delete(id).await;
    spinner.finish_and_clear();
    let message = result.friendly()?;

    ctx.output.success(&message);
    Ok(())
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<OrderStatus>> {
    match raw {
        // "all" means no filter, matching the admin view's dropdown.
        None => Ok(None),
        Some("all") => Ok(None),
        Some(s) => Ok(Some(OrderStatus::parse(s).friendly()?)),
    }
}

fn render_table(orders: &[Order], ctx: &Context) {
    if orders.is_empty() {
        ctx.output.info("No orders found.");
        return;
    }

    ctx.output
        .table_row(&["ORDER", "DATE", "STATUS", "ITEMS", "TOTAL"], WIDTHS);
    for order in orders {
        ctx.output.table_row(
            &[
                &order.display_number(),
                &order.created_at.format("%Y-%m-%d").to_string(),
                &status_badge(order.status),
                &order.item_count().to_string(),
                &order.total_amount.display(),
            ],
            WIDTHS,
        );
    }
}

fn render_footer(page_data: &Page<Order>, page: i64, per_page: i64, ctx: &Context) {
    let pager = page_data.pager(page, per_page);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Page {} of {} ({} orders)",
        pager.page, pager.total_pages, pager.total
    ));
}
