//! FreshCart CLI - Cart, wishlist and catalog from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add two of product 3 to the cart, then show it
//! freshcart cart add 3 --quantity 2
//! freshcart cart show
//!
//! # Toggle product 5 on the wishlist
//! freshcart wishlist toggle 5
//!
//! # Query the catalog (cached after the first successful fetch)
//! freshcart catalog products
//! freshcart catalog category "men's clothing"
//!
//! # Print home page section data
//! freshcart home --slides 3
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and change cart lines
//! - `wishlist` - Show and toggle wishlist entries
//! - `catalog` - Products, categories, and per-category products
//! - `home` - Main banner, category blocks, promotions and special offer
//!
//! All output is JSON on stdout; logs go to stderr. State lives in the file
//! named by `FRESHCART_STORAGE_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use freshcart_core::ProductId;
use freshcart_storefront::{FileStore, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "freshcart")]
#[command(author, version, about = "FreshCart storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show and toggle wishlist entries
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        query: CatalogQuery,
    },
    /// Print home page section data
    Home {
        /// Number of main banner slides to fill
        #[arg(short, long, default_value_t = 3)]
        slides: usize,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total quantity
    Show,
    /// Add quantity to a line (negative values shrink it)
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i32,
    },
    /// Remove a line
    Remove { product_id: ProductId },
    /// Set a line to an exact quantity (0 or less removes it)
    Set {
        product_id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: i32,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add or remove a product
    Toggle { product_id: ProductId },
}

#[derive(Subcommand)]
enum CatalogQuery {
    /// All products
    Products,
    /// Category names
    Categories,
    /// Products in one category
    Category { name: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet; install a plain one so the error is visible
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "freshcart=info,freshcart_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> freshcart_storefront::Result<()> {
    let storage = Arc::new(FileStore::open(&config.storage_path)?);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storage)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(storage, product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(storage, product_id)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(storage, product_id, quantity)?,
            CartAction::Clear => commands::cart::clear(storage)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::cart::show_wishlist(storage)?,
            WishlistAction::Toggle { product_id } => {
                commands::cart::toggle_wishlist(storage, product_id)?;
            }
        },
        Commands::Catalog { query } => {
            let catalog = commands::catalog::open(config, storage)?;
            match query {
                CatalogQuery::Products => commands::catalog::products(&catalog).await?,
                CatalogQuery::Categories => commands::catalog::categories(&catalog).await?,
                CatalogQuery::Category { name } => {
                    commands::catalog::category(&catalog, &name).await?;
                }
            }
        }
        Commands::Home { slides } => {
            let catalog = commands::catalog::open(config, storage)?;
            commands::catalog::home(&catalog, slides).await?;
        }
    }
    Ok(())
}
