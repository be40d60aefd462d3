//! Cart store: the single owner of the cart.
//!
//! Every mutation follows the same shape: read the current snapshot, consult
//! the catalog and stock collaborators, build a new cart, then commit it. A
//! commit writes the encoded cart to storage and only then publishes it, so
//! any observer of a new snapshot can rely on storage already holding it.

use std::sync::Arc;

use common::ProductId;
use storage::KeyValueStore;
use tokio::sync::{Mutex, MutexGuard, watch};

use crate::codec;
use crate::config::{CartConfig, ConcurrencyMode};
use crate::error::{CartError, LookupError, Operation};
use crate::model::{Cart, LineItem};
use crate::services::{CatalogLookup, Notifier, StockOracle};

/// Shopping cart state store.
///
/// The store is built once with its collaborators and shared by reference.
/// Each mutating operation comes in two forms:
///
/// - `add_product`, `remove_product` and `update_product_amount` report
///   failures to the [`Notifier`] only. Callers observe either the same
///   snapshot as before or a new, persisted one.
/// - `try_*` variants return the committed snapshot or the [`CartError`]
///   and never notify.
pub struct CartStore<C, S, K, N>
where
    C: CatalogLookup,
    S: StockOracle,
    K: KeyValueStore,
    N: Notifier,
{
    catalog: C,
    stock: S,
    storage: K,
    notifier: N,
    config: CartConfig,
    snapshot: watch::Sender<Arc<Cart>>,
    commit_lock: Mutex<()>,
    operation_lock: Mutex<()>,
}

impl<C, S, K, N> CartStore<C, S, K, N>
where
    C: CatalogLookup,
    S: StockOracle,
    K: KeyValueStore,
    N: Notifier,
{
    /// Creates a store, restoring the cart persisted under the configured key.
    ///
    /// A missing, unreadable or malformed persisted cart yields an empty cart.
    #[tracing::instrument(skip_all, fields(key = %config.storage_key))]
    pub async fn load(catalog: C, stock: S, storage: K, notifier: N, config: CartConfig) -> Self {
        let cart = match storage.read(&config.storage_key).await {
            Ok(Some(raw)) => codec::decode(&raw).unwrap_or_else(|| {
                tracing::warn!("persisted cart is malformed, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(error) => {
                tracing::warn!(%error, "persisted cart is unreadable, starting empty");
                Cart::new()
            }
        };
        tracing::debug!(items = cart.len(), "cart restored");

        let (snapshot, _) = watch::channel(Arc::new(cart));
        Self {
            catalog,
            stock,
            storage,
            notifier,
            config,
            snapshot,
            commit_lock: Mutex::new(()),
            operation_lock: Mutex::new(()),
        }
    }

    /// Returns the current cart snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.snapshot.borrow())
    }

    /// Returns a receiver notified with every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.snapshot.subscribe()
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Adds one unit of a product, reporting failures to the notifier.
    pub async fn add_product(&self, product_id: ProductId) {
        let result = self.try_add_product(product_id).await;
        self.report(Operation::Add, product_id, result);
    }

    /// Removes a product, reporting failures to the notifier.
    pub async fn remove_product(&self, product_id: ProductId) {
        let result = self.try_remove_product(product_id).await;
        self.report(Operation::Remove, product_id, result);
    }

    /// Sets the quantity of a product already in the cart, reporting
    /// failures to the notifier. Non-positive amounts are ignored.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) {
        let result = self.try_update_product_amount(product_id, amount).await;
        self.report(Operation::UpdateAmount, product_id, result);
    }

    /// Adds one unit of a product.
    ///
    /// A product already in the cart has its amount incremented; a new one
    /// is fetched from the catalog and appended with amount 1. Fails with
    /// `StockExceeded` if the cart already holds the whole stock.
    #[tracing::instrument(skip(self))]
    pub async fn try_add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _serial = self.serialize().await;
        let cart = self.cart();

        let (product, current) = match cart.get(product_id) {
            Some(item) => (item.product().clone(), item.amount()),
            None => {
                let product = self
                    .catalog
                    .get(product_id)
                    .await?
                    .ok_or(LookupError::NoData(product_id))?;
                if product.id() != product_id {
                    return Err(LookupError::Malformed(format!(
                        "catalog returned product {} for {product_id}",
                        product.id()
                    ))
                    .into());
                }
                (product, 0)
            }
        };

        let stock = self.stock.get(product_id).await?;
        if current >= stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: u64::from(current) + 1,
                available: stock.amount,
            });
        }

        self.commit(cart.with_item(LineItem::new(product, current + 1)))
            .await
    }

    /// Removes a product from the cart.
    #[tracing::instrument(skip(self))]
    pub async fn try_remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _serial = self.serialize().await;
        let cart = self.cart();

        let next = cart
            .without(product_id)
            .ok_or(CartError::NotFound(product_id))?;
        self.commit(next).await
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// The stock check runs before the presence check, so an oversized
    /// amount for an absent product reports `StockExceeded`.
    #[tracing::instrument(skip(self))]
    pub async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<Cart>, CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }

        let _serial = self.serialize().await;
        let cart = self.cart();

        let stock = self.stock.get(product_id).await?;
        let amount = u32::try_from(amount)
            .ok()
            .filter(|&amount| amount <= stock.amount)
            .ok_or(CartError::StockExceeded {
                product_id,
                requested: amount.unsigned_abs(),
                available: stock.amount,
            })?;

        let next = cart
            .with_amount(product_id, amount)
            .ok_or(CartError::NotFound(product_id))?;
        self.commit(next).await
    }

    /// Persists a cart, then publishes it.
    ///
    /// Holding the commit lock across both steps keeps storage and the
    /// published snapshot identical even when commits race.
    async fn commit(&self, cart: Cart) -> Result<Arc<Cart>, CartError> {
        let encoded = codec::encode(&cart)?;

        let _guard = self.commit_lock.lock().await;
        self.storage
            .write(&self.config.storage_key, encoded)
            .await?;

        let cart = Arc::new(cart);
        self.snapshot.send_replace(Arc::clone(&cart));

        metrics::counter!("cart_commits_total").increment(1);
        tracing::info!(
            items = cart.len(),
            quantity = cart.total_quantity(),
            "cart committed"
        );
        Ok(cart)
    }

    /// Holds the operation lock when operations must not interleave.
    async fn serialize(&self) -> Option<MutexGuard<'_, ()>> {
        match self.config.concurrency {
            ConcurrencyMode::Serialized => Some(self.operation_lock.lock().await),
            ConcurrencyMode::Interleaved => None,
        }
    }

    fn report(
        &self,
        operation: Operation,
        product_id: ProductId,
        result: Result<Arc<Cart>, CartError>,
    ) {
        metrics::counter!("cart_operations_total", "operation" => operation.as_str()).increment(1);

        let Err(error) = result else {
            return;
        };

        match operation.notification_for(&error) {
            Some(message) => {
                metrics::counter!(
                    "cart_operations_failed",
                    "operation" => operation.as_str(),
                    "kind" => error.kind()
                )
                .increment(1);
                tracing::warn!(%operation, %product_id, %error, "cart operation failed");
                self.notifier.notify(message);
            }
            None => {
                tracing::debug!(%operation, %product_id, %error, "cart operation ignored");
            }
        }
    }
}
