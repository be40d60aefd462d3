//! Shared types for the cart store crates.

mod types;

pub use types::{ParseProductIdError, ProductId};
