//! External collaborator traits and in-memory implementations.

pub mod catalog;
pub mod notifier;
pub mod stock;

pub use catalog::{CatalogLookup, InMemoryCatalog};
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use stock::{InMemoryStockOracle, StockHold, StockOracle};
