//! Harvest CLI - terminal storefront for the Harvest produce marketplace.
//!
//! Commands:
//! - `harvest products` - Browse and search the catalog
//! - `harvest cart` - Manage the shopping cart
//! - `harvest checkout` - Shipping details and payment
//! - `harvest orders` - Order history and admin order management
//! - `harvest auth` - Sign up, sign in, sign out
//! - `harvest admin` - Dashboard, analytics, catalog management

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AdminArgs, AuthArgs, CartArgs, CheckoutArgs, OrdersArgs, ProductsArgs};

/// Harvest CLI - Shop the Harvest produce marketplace from the terminal
#[derive(Parser)]
#[command(name = "harvest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Backend base URL (overrides config and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the catalog
    Products(ProductsArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Shipping details and payment
    Checkout(CheckoutArgs),

    /// Order history and admin order management
    Orders(OrdersArgs),

    /// Sign up, sign in, sign out
    Auth(AuthArgs),

    /// Dashboard, analytics, catalog management
    Admin(AdminArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so tables and JSON stay pipeable
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config and connect the client
    let config_path = cli.config.as_deref();
    let base_url = cli.base_url.as_deref();
    let ctx = context::Context::load(config_path, base_url, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
