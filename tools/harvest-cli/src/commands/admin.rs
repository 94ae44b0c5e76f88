//! Admin commands: the dashboard, analytics, and catalog management.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;

use harvest_commerce::catalog::{Category, ImageUpload, NewProduct, ProductUpdate};
use harvest_commerce::ids::ProductId;
use harvest_commerce::money::Money;

use super::{ensure_admin, AddProductArgs, AdminArgs, AdminCommand, Friendly, UpdateProductArgs};
use crate::context::Context;
use crate::output::status_badge;

pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Dashboard => dashboard(ctx).await,
        AdminCommand::Analytics => analytics(ctx).await,
        AdminCommand::AddProduct(args) => add_product(args, ctx).await,
        AdminCommand::UpdateProduct(args) => update_product(args, ctx).await,
        AdminCommand::DeleteProduct { product_id, yes } => {
            delete_product(ProductId::new(product_id), yes, ctx).await
        }
        AdminCommand::Describe { name } => describe(&name, ctx).await,
    }
}

async fn dashboard(ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin dashboard").await?;

    let spinner = ctx.output.spinner("Loading dashboard...");
    let result = ctx.client.reporting().dashboard_stats().await;
    spinner.finish_and_clear();
    let stats = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    ctx.output.kv("Products", &stats.total_products.to_string());
    ctx.output.kv("Orders", &stats.total_orders.to_string());
    ctx.output.kv("Revenue", &stats.total_revenue.display());
    ctx.output.kv("Growth", &stats.growth_rate);

    if stats.has_low_stock() {
        ctx.output.header("Low stock");
        for product in &stats.low_stock_products {
            let category = product.category.as_deref().unwrap_or("-");
            ctx.output.list_item(&format!(
                "{} ({}): {} left",
                product.name, category, product.quantity
            ));
        }
    }

    if !stats.recent_orders.is_empty() {
        ctx.output.header("Recent orders");
        const WIDTHS: &[usize] = &[12, 12, 12, 14];
        ctx.output
            .table_row(&["ORDER", "DATE", "STATUS", "TOTAL"], WIDTHS);
        for order in &stats.recent_orders {
            let number = order
                .sku
                .clone()
                .unwrap_or_else(|| format!("#{}", order.id));
            ctx.output.table_row(
                &[
                    &number,
                    &order.created_at.format("%Y-%m-%d").to_string(),
                    &status_badge(order.status),
                    &order.total_amount.display(),
                ],
                WIDTHS,
            );
        }
    }

    Ok(())
}

async fn analytics(ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin analytics").await?;

    let spinner = ctx.output.spinner("Loading analytics...");
    let result = ctx.client.reporting().analytics().await;
    spinner.finish_and_clear();
    let analytics = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&analytics);
        return Ok(());
    }

    ctx.output.header("Analytics");
    ctx.output
        .kv("Revenue", &analytics.metrics.total_revenue.display());
    ctx.output
        .kv("Orders", &analytics.metrics.total_orders.to_string());
    ctx.output.kv(
        "Average order",
        &analytics.metrics.average_order_value.display(),
    );
    ctx.output.kv(
        "Conversion",
        &format!("{}%", analytics.metrics.conversion_rate),
    );

    if !analytics.sales_data.is_empty() {
        ctx.output.header("Monthly sales");
        const WIDTHS: &[usize] = &[6, 16, 8];
        ctx.output.table_row(&["MONTH", "SALES", "ORDERS"], WIDTHS);
        for month in &analytics.sales_data {
            ctx.output.table_row(
                &[
                    &month.month,
                    &month.sales.display(),
                    &month.orders.to_string(),
                ],
                WIDTHS,
            );
        }
    }

    if !analytics.category_data.is_empty() {
        ctx.output.header("Catalog by category");
        for slice in &analytics.category_data {
            ctx.output
                .list_item(&format!("{}: {} products", slice.name, slice.value));
        }
    }

    if !analytics.top_products.is_empty() {
        ctx.output.header("Top products");
        const WIDTHS: &[usize] = &[28, 6, 16];
        ctx.output.table_row(&["NAME", "SOLD", "REVENUE"], WIDTHS);
        for product in &analytics.top_products {
            ctx.output.table_row(
                &[
                    &product.name,
                    &product.sold.to_string(),
                    &product.revenue.display(),
                ],
                WIDTHS,
            );
        }
    }

    Ok(())
}

async fn add_product(args: AddProductArgs, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin add-product").await?;

    let price = Money::parse(&args.price).friendly()?;
    let mut product = NewProduct::new(args.name.as_str(), price)
        .with_stock(args.quantity, args.minimum_stock)
        .with_featured(args.featured);

    if let Some(category) = args.category.as_deref() {
        product = product.with_category(Category::parse(category).friendly()?);
    }

    if let Some(description) = args.description {
        product = product.with_description(description);
    } else if args.describe {
        let spinner = ctx.output.spinner("Writing a description...");
        let result = ctx.client.products().generate_description(&args.name).await;
        spinner.finish_and_clear();
        let generated = result.friendly()?;
        product = product.with_description(generated.description);
    }

    if let Some(path) = args.image.as_deref() {
        product = product.with_image(load_image(path)?);
    }

    let spinner = ctx.output.spinner("Creating product...");
    let result = ctx.client.products().create(&product).await;
    spinner.finish_and_clear();
    let created = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }

    ctx.output
        .success(&format!("Product '{}' created", created.name));
    ctx.output.kv("Id", &created.id.to_string());
    ctx.output.kv("Sku", &created.sku);
    ctx.output.kv("Slug", &created.slug);
    ctx.output.kv("Price", &created.price.display());
    Ok(())
}

async fn update_product(args: UpdateProductArgs, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin update-product").await?;

    let mut update = ProductUpdate::new();
    if let Some(name) = args.name {
        update = update.name(name);
    }
    if let Some(price) = args.price.as_deref() {
        update = update.price(Money::parse(price).friendly()?);
    }
    if let Some(description) = args.description {
        update = update.description(description);
    }
    if let Some(category) = args.category.as_deref() {
        update = update.category(Category::parse(category).friendly()?);
    }
    if let Some(quantity) = args.quantity {
        update = update.quantity(quantity);
    }
    if let Some(minimum_stock) = args.minimum_stock {
        update = update.minimum_stock(minimum_stock);
    }
    if let Some(featured) = args.featured {
        update = update.featured(featured);
    }
    if let Some(path) = args.image.as_deref() {
        update = update.image(load_image(path)?);
    }

    if update.is_empty() {
        bail!("Nothing to update. Pass at least one field flag.");
    }

    let spinner = ctx.output.spinner("Updating product...");
    let result = ctx
        .client
        .products()
        .update(ProductId::new(args.product_id), &update)
        .await;
    spinner.finish_and_clear();
    let updated = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&updated);
        return Ok(());
    }

    ctx.output
        .success(&format!("Product '{}' updated", updated.name));
    Ok(())
}

async fn delete_product(id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin delete-product").await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Deleting product...");
    let result = ctx.client.products().delete(id).await;
    spinner.finish_and_clear();
    let message = result.friendly()?;

    ctx.output.success(&message);
    Ok(())
}

async fn describe(name: &str, ctx: &Context) -> Result<()> {
    ensure_admin(ctx, "admin describe").await?;

    let spinner = ctx.output.spinner("Writing a description...");
    let result = ctx.client.products().generate_description(name).await;
    spinner.finish_and_clear();
    let generated = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&generated);
        return Ok(());
    }

    ctx.output.header(&generated.name);
    ctx.output.info(&generated.description);
    Ok(())
}

fn load_image(path: &str) -> Result<ImageUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image: {path}"))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let image = ImageUpload::from_bytes(file_name, bytes);
    image.validate().friendly()?;
    Ok(image)
}
