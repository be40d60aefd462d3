//! Catalog lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::error::LookupError;
use crate::model::Product;

/// Source of product metadata.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetches the product with the given ID.
    ///
    /// Returns Ok(None) when the catalog answers without data.
    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, LookupError>;
}

#[async_trait]
impl<T: CatalogLookup + ?Sized> CatalogLookup for Arc<T> {
    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, LookupError> {
        (**self).get(product_id).await
    }
}

/// In-memory catalog for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    fail: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id(), p)).collect();
        Self {
            products: Arc::new(RwLock::new(products)),
            ..Self::default()
        }
    }

    /// Adds or replaces a product.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id(), product);
    }

    /// Stores a product under a key other than its own id, so lookups for
    /// `key` answer with a record for a different product.
    pub async fn insert_as(&self, key: ProductId, product: Product) {
        self.products.write().await.insert(key, product);
    }

    /// Configures every lookup to fail until reset.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of lookups served so far, failed ones included.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("catalog offline".to_string()));
        }

        Ok(self.products.read().await.get(&product_id).cloned())
    }
}
