//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use harvest_session::{guard_admin, guard_signed_in, GuardOutcome, SessionError};

use crate::context::Context;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List the catalog, one page at a time.
    List {
        /// Page number (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: i64,
    },
    /// Show one product.
    Show {
        /// Product id or slug.
        product: String,
    },
    /// Show the featured picks.
    Featured,
    /// Search the catalog. With no query, reads queries interactively.
    Search {
        /// Search terms.
        query: Option<String>,

        /// Page number (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: i64,

        /// Restrict results to one category.
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product id.
        product_id: i64,
    },
    /// Raise an item's quantity by one.
    Increase {
        /// Cart item id.
        item_id: i64,
    },
    /// Lower an item's quantity by one.
    Decrease {
        /// Cart item id.
        item_id: i64,
    },
    /// Remove an item from the cart.
    Remove {
        /// Cart item id.
        item_id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Check whether a product is already in the cart.
    Check {
        /// Product id.
        product_id: i64,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Enter or update the shipping address.
    Shipping,
    /// Price the cart and start a payment.
    Pay {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Verify a payment by its gateway reference.
    Verify {
        /// Gateway transaction reference.
        reference: String,
    },
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders.
    List {
        /// Page number (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: i64,
    },
    /// List every order (admin).
    All {
        /// Page number (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: i64,

        /// Only orders with this status.
        #[arg(short, long)]
        status: Option<String>,

        /// Look orders up by their number instead (e.g. ORD-1A2B3C).
        #[arg(long)]
        sku: Option<String>,
    },
    /// Move an order to a new status (admin).
    SetStatus {
        /// Order id.
        order_id: i64,

        /// New status: pending, success, failed, shipped, delivered or
        /// cancelled.
        status: String,
    },
    /// Delete an order (admin).
    Delete {
        /// Order id.
        order_id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account.
    Signup,
    /// Sign in and store the session.
    Signin,
    /// Sign out and clear the session.
    Signout,
    /// Show who is signed in.
    Whoami,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Headline numbers, low stock, recent orders.
    Dashboard,
    /// Revenue, category and top-product breakdowns.
    Analytics,
    /// Add a product to the catalog.
    AddProduct(AddProductArgs),
    /// Update a product. Only the fields you pass change.
    UpdateProduct(UpdateProductArgs),
    /// Delete a product.
    DeleteProduct {
        /// Product id.
        product_id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate a description for a product name.
    Describe {
        /// Product name.
        name: String,
    },
}

/// Arguments for the add-product command.
#[derive(Args)]
pub struct AddProductArgs {
    /// Product name.
    #[arg(long)]
    pub name: String,

    /// Price in rupees (e.g. 45.00).
    #[arg(long)]
    pub price: String,

    /// Product description.
    #[arg(long)]
    pub description: Option<String>,

    /// Generate a description from the product name.
    #[arg(long)]
    pub describe: bool,

    /// Category slug (e.g. vegetables).
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock.
    #[arg(long, default_value = "0")]
    pub quantity: u32,

    /// Low-stock alert threshold.
    #[arg(long, default_value = "10")]
    pub minimum_stock: u32,

    /// Feature this product on the home page.
    #[arg(long)]
    pub featured: bool,

    /// Path to a product photo (jpg or png, up to 5 MB).
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the update-product command.
#[derive(Args)]
pub struct UpdateProductArgs {
    /// Product id.
    pub product_id: i64,

    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Price in rupees (e.g. 45.00).
    #[arg(long)]
    pub price: Option<String>,

    /// Product description.
    #[arg(long)]
    pub description: Option<String>,

    /// Category slug (e.g. vegetables).
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock.
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Low-stock alert threshold.
    #[arg(long)]
    pub minimum_stock: Option<u32>,

    /// Set or clear the featured flag.
    #[arg(long)]
    pub featured: Option<bool>,

    /// Path to a new product photo.
    #[arg(long)]
    pub image: Option<String>,
}

/// Maps API failures onto the message a shopper should see.
pub(crate) trait Friendly<T> {
    fn friendly(self) -> Result<T>;
}

impl<T, E: Into<SessionError>> Friendly<T> for std::result::Result<T, E> {
    fn friendly(self) -> Result<T> {
        self.map_err(|e| anyhow::anyhow!(e.into().message()))
    }
}

/// Stop commands that need a signed-in session.
pub(crate) async fn ensure_signed_in(ctx: &Context, from: &str) -> Result<()> {
    match guard_signed_in(&ctx.client, from).await {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::Redirect { .. } => {
            bail!("You need to sign in first. Run `harvest auth signin`.")
        }
    }
}

/// Stop commands that need an admin account.
pub(crate) async fn ensure_admin(ctx: &Context, from: &str) -> Result<()> {
    match guard_admin(&ctx.client, from).await {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::Redirect { .. } => {
            bail!("Admin access required. Sign in with an admin account first.")
        }
    }
}
