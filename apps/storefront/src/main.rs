//! RocketShoes CLI - inspect and edit the persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rocketshoes show
//!
//! # Add one unit of product 3
//! rocketshoes add 3
//!
//! # Set product 3 to 2 units
//! rocketshoes update 3 2
//!
//! # Remove product 3, then empty the cart
//! rocketshoes remove 3
//! rocketshoes clear
//!
//! # List the catalog
//! rocketshoes products
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rocketshoes_core::{Money, ProductId};
use rocketshoes_storefront::commands::cart::{self, CartResponse};
use rocketshoes_storefront::commands::product;
use rocketshoes_storefront::error::ApiError;
use rocketshoes_storefront::state::{ChannelNotifier, StorefrontConfig};
use rocketshoes_storefront::{init_tracing, Storefront};

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        amount: i32,
    },
    /// Empty the cart
    Clear,
    /// List the catalog
    Products,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::load(cli.config)?;
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let app = Storefront::bootstrap(config, Arc::new(notifier)).await?;
    let store = Arc::clone(&app.store);

    let result: Result<(), ApiError> = async {
        match cli.command {
            Commands::Show => print_cart(&cart::get_cart(&store)),
            Commands::Add { product_id } => {
                print_cart(&cart::add_product(&store, product_id).await?);
            }
            Commands::Remove { product_id } => {
                print_cart(&cart::remove_product(&store, product_id).await?);
            }
            Commands::Update { product_id, amount } => {
                print_cart(&cart::update_product_amount(&store, product_id, amount).await?);
            }
            Commands::Clear => print_cart(&cart::clear_cart(&store).await?),
            Commands::Products => {
                for p in product::list_products(app.catalog.as_ref(), &store).await? {
                    println!(
                        "{:>4}  {:<40} {:>12}  no carrinho: {}",
                        p.id, p.title, p.price_formatted, p.amount_in_cart
                    );
                }
            }
        }
        Ok(())
    }
    .await;

    while let Ok(notification) = notifications.try_recv() {
        eprintln!("{}", notification.message());
    }

    app.shutdown().await?;
    Ok(result?)
}

fn print_cart(view: &CartResponse) {
    if view.items.is_empty() {
        println!("Carrinho vazio");
        return;
    }

    for item in &view.items {
        println!(
            "{:>4}  {:<40} x{:<3} {:>12}",
            item.id,
            item.title,
            item.amount,
            item.line_total().to_string()
        );
    }
    println!(
        "{} produto(s), {} unidade(s), total {}",
        view.totals.item_count,
        view.totals.total_amount,
        Money::from_cents(view.totals.subtotal_cents)
    );
}
