//! Product fixture loading.
//!
//! A fixture is a JSON array of products, each with its stock level:
//!
//! ```json
//! [{ "id": 1, "title": "Running shoe", "price": 139.9, "stock": 3 }]
//! ```

use std::path::Path;

use cart::{InMemoryCatalog, InMemoryStockOracle, Product, ProductId};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    id: ProductId,
    stock: u32,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

/// Catalog and stock levels read from a fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub catalog: InMemoryCatalog,
    pub stock: InMemoryStockOracle,
    pub product_count: usize,
}

impl Fixture {
    /// Parses a fixture from its JSON text.
    pub fn parse(raw: &str) -> Result<Self, CliError> {
        let entries: Vec<FixtureEntry> = serde_json::from_str(raw)?;
        let product_count = entries.len();

        let levels: Vec<(ProductId, u32)> = entries.iter().map(|e| (e.id, e.stock)).collect();
        let products = entries
            .into_iter()
            .map(|entry| Product::from_parts(entry.id, entry.attributes));

        Ok(Self {
            catalog: InMemoryCatalog::with_products(products),
            stock: InMemoryStockOracle::with_levels(levels),
            product_count,
        })
    }

    /// Reads and parses a fixture file.
    pub async fn load(path: &Path) -> Result<Self, CliError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CliError::Fixture {
                path: path.to_path_buf(),
                source,
            })?;
        let fixture = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), products = fixture.product_count, "fixture loaded");
        Ok(fixture)
    }
}
