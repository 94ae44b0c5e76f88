//! Catalog browsing commands.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use harvest_commerce::catalog::{Category, Product};
use harvest_commerce::ids::ProductId;
use harvest_commerce::page::{Page, PRODUCT_PAGE_SIZE};
use harvest_session::Debouncer;

use super::{Friendly, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::stock_label;

const WIDTHS: &[usize] = &[6, 28, 12, 12, 10];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List { page } => list(page, ctx).await,
        ProductsCommand::Show { product } => show(&product, ctx).await,
        ProductsCommand::Featured => featured(ctx).await,
        ProductsCommand::Search {
            query,
            page,
            category,
        } => {
            let category = parse_category(category.as_deref())?;
            match query {
                Some(q) => search(&q, page, category, ctx).await,
                None => interactive_search(category, ctx).await,
            }
        }
    }
}

async fn list(page: i64, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let result = ctx.client.products().list(page).await;
    spinner.finish_and_clear();
    let products = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    render_table(&products.results, ctx);
    render_footer(&products, page, ctx);
    Ok(())
}

async fn show(product: &str, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading product...");
    // A bare number is a row id; anything else is treated as a slug.
    let result = match product.parse::<i64>() {
        Ok(id) => ctx.client.products().get(ProductId::new(id)).await,
        Err(_) => ctx.client.products().get_by_slug(product).await,
    };
    spinner.finish_and_clear();
    let product = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("Id", &product.id.to_string());
    ctx.output.kv("Sku", &product.sku);
    if let Some(category) = product.category {
        ctx.output.kv("Category", category.display_name());
    }
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv(
        "Stock",
        &stock_label(product.quantity, product.is_low_stock()),
    );
    if product.featured {
        ctx.output.kv("Featured", "yes");
    }
    if !product.description.is_empty() {
        ctx.output.kv("About", &product.description);
    }
    ctx.output.kv("Added", &product.created_at.format("%Y-%m-%d").to_string());
    Ok(())
}

async fn featured(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading featured picks...");
    let result = ctx.client.products().featured().await;
    spinner.finish_and_clear();
    let products = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Featured");
    render_table(&products, ctx);
    Ok(())
}

async fn search(query: &str, page: i64, category: Option<Category>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Searching...");
    let result = ctx.client.products().browse(page, query, category).await;
    spinner.finish_and_clear();
    let products = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Results for \"{}\"", query));
    render_table(&products.results, ctx);
    render_footer(&products, page, ctx);
    Ok(())
}

/// Read queries line by line, debounced so pasted or rapid input only
/// searches once.
async fn interactive_search(category: Option<Category>, ctx: &Context) -> Result<()> {
    ctx.output.info("Type a search and press enter; an empty line quits.");

    let debouncer = Debouncer::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let query = line.trim().to_string();
                if query.is_empty() {
                    break;
                }
                let debouncer = debouncer.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(winner) = debouncer.submit(query).await {
                        let _ = tx.send(winner);
                    }
                });
            }
            Some(query) = rx.recv() => {
                search(&query, 1, category, ctx).await?;
            }
        }
    }

    // Let a still-pending query fire before leaving
    drop(tx);
    while let Some(query) = rx.recv().await {
        search(&query, 1, category, ctx).await?;
    }

    Ok(())
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>> {
    match raw {
        Some(s) => Ok(Some(Category::parse(s).friendly()?)),
        None => Ok(None),
    }
}

fn render_table(products: &[Product], ctx: &Context) {
    if products.is_empty() {
        ctx.output.info("No products found.");
        return;
    }

    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], WIDTHS);
    for product in products {
        let category = product.category.map(|c| c.display_name()).unwrap_or("-");
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                category,
                &product.price.display(),
                &stock_label(product.quantity, product.is_low_stock()),
            ],
            WIDTHS,
        );
    }
}

fn render_footer(page_data: &Page<Product>, page: i64, ctx: &Context) {
    let pager = page_data.pager(page, PRODUCT_PAGE_SIZE);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Page {} of {} ({} products)",
        pager.page, pager.total_pages, pager.total
    ));
}
