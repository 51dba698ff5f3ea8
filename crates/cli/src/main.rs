//! Atelier CLI - manage the persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a product snapshot to the cart
//! atelier cart add --id canvas --name "Premium Art Canvas" --price 59.99 -q 2
//!
//! # Inspect the cart
//! atelier cart show
//! atelier cart show --json
//!
//! # Change or remove items
//! atelier cart update canvas 3
//! atelier cart remove canvas
//! atelier cart clear
//!
//! # Subtotal, shipping, tax and total
//! atelier cart summary
//! ```
//!
//! # Environment Variables
//!
//! See `atelier_storefront::config`. `--storage-dir` and `--storage-key`
//! override `ATELIER_STORAGE_DIR` and `ATELIER_CART_STORAGE_KEY`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use atelier_core::Quantity;
use atelier_storefront::{AppError, AtelierConfig, CartPersistence, FileStorage};
use clap::{Parser, Subcommand};

mod commands;

use commands::cart::{self, ProductInput};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Atelier cart tools")]
struct Cli {
    /// Directory holding persisted slots
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Slot name the cart is stored under
    #[arg(long, global = true)]
    storage_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart items and totals
    Show {
        /// Print the items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product, merging with an existing item for the same id
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 59.99
        #[arg(long)]
        price: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: Quantity,

        /// Product description
        #[arg(long)]
        description: Option<String>,

        /// Image reference (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Category label
        #[arg(long)]
        category: Option<String>,
    },
    /// Overwrite the quantity of an item
    Update {
        /// Product identifier
        id: String,

        /// New quantity, stored as given
        #[arg(allow_negative_numbers = true)]
        quantity: Quantity,
    },
    /// Remove an item
    Remove {
        /// Product identifier
        id: String,
    },
    /// Remove every item
    Clear,
    /// Show subtotal, shipping, tax and total
    Summary,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "atelier_storefront=info,atelier=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = AtelierConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.storage_key {
        atelier_storefront::storage::validate_key(&key)?;
        config.cart_storage_key = key;
    }

    tracing::debug!(
        storage_dir = %config.storage_dir.display(),
        key = %config.cart_storage_key,
        "Opening cart"
    );
    let persistence = CartPersistence::new(
        FileStorage::new(&config.storage_dir),
        config.cart_storage_key.clone(),
    );
    let mut store = persistence.into_store();

    let Commands::Cart { action } = cli.command;
    match action {
        CartAction::Show { json } => {
            let text = cart::show(store.cart(), json)?;
            output(&text);
        }
        CartAction::Add {
            id,
            name,
            price,
            quantity,
            description,
            images,
            category,
        } => {
            let input = ProductInput {
                id,
                name,
                price,
                description,
                images,
                category,
            };
            cart::add(&mut store, input, quantity)?;
        }
        CartAction::Update { id, quantity } => cart::update(&mut store, &id, quantity),
        CartAction::Remove { id } => cart::remove(&mut store, &id),
        CartAction::Clear => cart::clear(&mut store),
        CartAction::Summary => output(&cart::summary(store.cart(), &config.pricing)),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn output(text: &str) {
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
}
