//! Cart error types and their mapping to user notifications.

use common::ProductId;
use storage::StorageError;
use thiserror::Error;

/// Message shown when a product cannot be added.
pub const ADD_FAILED: &str = "add product failed";
/// Message shown when a product cannot be removed.
pub const REMOVE_FAILED: &str = "remove product failed";
/// Message shown when a quantity cannot be changed.
pub const UPDATE_FAILED: &str = "update quantity failed";
/// Message shown when the requested quantity exceeds stock.
pub const OUT_OF_STOCK: &str = "requested quantity unavailable";

/// Errors returned by the catalog and stock collaborators.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The remote service could not be reached or answered with an error.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered without data for the product.
    #[error("No data for product {0}")]
    NoData(ProductId),

    /// The service answered with data the cart cannot use.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog or stock lookup failed or returned no usable data.
    #[error("Lookup failed: {0}")]
    LookupFailure(#[from] LookupError),

    /// The operation targets a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The resulting quantity would exceed available stock.
    #[error("Requested {requested} of product {product_id}, only {available} available")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Non-positive quantity passed to an update.
    #[error("Invalid amount: {0} (must be greater than 0)")]
    InvalidAmount(i64),

    /// The cart could not be written to storage.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartError::LookupFailure(_) => "lookup_failure",
            CartError::NotFound(_) => "not_found",
            CartError::StockExceeded { .. } => "stock_exceeded",
            CartError::InvalidAmount(_) => "invalid_amount",
            CartError::Storage(_) => "storage",
            CartError::Serialization(_) => "serialization",
        }
    }
}

/// The mutating operations of the cart store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Returns the operation name used for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::UpdateAmount => "update_product_amount",
        }
    }

    /// Returns the catch-all failure message of the operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => ADD_FAILED,
            Operation::Remove => REMOVE_FAILED,
            Operation::UpdateAmount => UPDATE_FAILED,
        }
    }

    /// Returns the notification for an error of this operation.
    ///
    /// Returns None for errors that are ignored without telling the user.
    pub fn notification_for(&self, error: &CartError) -> Option<&'static str> {
        match error {
            CartError::InvalidAmount(_) => None,
            CartError::StockExceeded { .. } => Some(OUT_OF_STOCK),
            CartError::LookupFailure(_)
            | CartError::NotFound(_)
            | CartError::Storage(_)
            | CartError::Serialization(_) => Some(self.failure_message()),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
