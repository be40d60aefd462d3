//! Stock oracle trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};

use crate::error::LookupError;
use crate::model::Stock;

/// Source of current stock levels.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Fetches the available quantity of a product.
    async fn get(&self, product_id: ProductId) -> Result<Stock, LookupError>;
}

#[async_trait]
impl<T: StockOracle + ?Sized> StockOracle for Arc<T> {
    async fn get(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        (**self).get(product_id).await
    }
}

/// Keeps stock lookups for one product suspended until dropped or released.
#[derive(Debug)]
pub struct StockHold {
    _guard: OwnedRwLockWriteGuard<()>,
}

impl StockHold {
    /// Lets suspended lookups proceed.
    pub fn release(self) {}
}

/// In-memory stock oracle for testing and local runs.
///
/// Products without a configured level answer with `NoData`. Lookups for a
/// product can be suspended with [`InMemoryStockOracle::hold`], which lets
/// tests interleave operations deterministically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockOracle {
    levels: Arc<RwLock<HashMap<ProductId, u32>>>,
    gates: Arc<Mutex<HashMap<ProductId, Arc<RwLock<()>>>>>,
    fail: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryStockOracle {
    /// Creates an oracle with no stock levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle with the given levels.
    pub fn with_levels(levels: impl IntoIterator<Item = (ProductId, u32)>) -> Self {
        Self {
            levels: Arc::new(RwLock::new(levels.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Sets the available quantity of a product.
    pub async fn set_stock(&self, product_id: ProductId, amount: u32) {
        self.levels.write().await.insert(product_id, amount);
    }

    /// Configures every lookup to fail until reset.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of lookups started so far.
    ///
    /// A lookup is counted as soon as it begins, before it waits on a hold.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Suspends lookups for a product until the returned hold is released.
    pub async fn hold(&self, product_id: ProductId) -> StockHold {
        let gate = Arc::clone(self.gates.lock().await.entry(product_id).or_default());
        StockHold {
            _guard: gate.write_owned().await,
        }
    }
}

#[async_trait]
impl StockOracle for InMemoryStockOracle {
    async fn get(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().await.get(&product_id).cloned();
        if let Some(gate) = gate {
            drop(gate.read().await);
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("stock service offline".to_string()));
        }

        self.levels
            .read()
            .await
            .get(&product_id)
            .map(|&amount| Stock::new(amount))
            .ok_or(LookupError::NoData(product_id))
    }
}
