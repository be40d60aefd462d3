//! Command-line driver for the cart store.
//!
//! The catalog and stock levels come from a JSON fixture; the cart itself
//! persists in a directory between runs.

pub mod config;
pub mod error;
pub mod fixture;

use std::sync::Arc;

use cart::{Cart, CartStore, InMemoryCatalog, InMemoryStockOracle, ProductId, TracingNotifier};
use clap::Subcommand;
use storage::FileKeyValueStore;

pub use config::Config;
pub use error::CliError;
pub use fixture::Fixture;

/// Cart store as assembled by the CLI.
pub type CliStore =
    CartStore<InMemoryCatalog, InMemoryStockOracle, FileKeyValueStore, TracingNotifier>;

/// Cart commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

/// Opens the store described by the configuration.
///
/// Notifications go through [`TracingNotifier`], so they reach stderr via
/// the subscriber installed by the binary.
pub async fn open_store(config: &Config) -> Result<CliStore, CliError> {
    let fixture = Fixture::load(&config.catalog_path).await?;
    let storage = FileKeyValueStore::open(&config.data_dir).await?;

    Ok(CartStore::load(
        fixture.catalog,
        fixture.stock,
        storage,
        TracingNotifier,
        config.cart.clone(),
    )
    .await)
}

/// Runs one command and returns the resulting cart.
pub async fn run(store: &CliStore, command: CartCommand) -> Arc<Cart> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add { id } => store.add_product(id).await,
        CartCommand::Remove { id } => store.remove_product(id).await,
        CartCommand::Set { id, amount } => store.update_product_amount(id, amount).await,
    }
    store.cart()
}
