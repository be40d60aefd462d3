//! Client-side shopping cart state.
//!
//! This crate provides:
//! - The cart data model (`Product`, `LineItem`, `Cart`)
//! - Collaborator traits for the catalog, the stock oracle and user
//!   notifications, with in-memory implementations
//! - `CartStore`, which validates every mutation against live stock and
//!   persists the cart before publishing it

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod store;

pub use common::ProductId;
pub use config::{CartConfig, ConcurrencyMode, DEFAULT_STORAGE_KEY};
pub use error::{CartError, LookupError, Operation};
pub use model::{Cart, DuplicateLineItem, LineItem, Product, Stock};
pub use services::{
    CatalogLookup, InMemoryCatalog, InMemoryStockOracle, Notifier, RecordingNotifier, StockHold,
    StockOracle, TracingNotifier,
};
pub use store::CartStore;
