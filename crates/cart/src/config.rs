//! Cart store configuration loaded from environment variables.

/// Key under which the cart is persisted unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// How the store orders operations that overlap in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// Operations run without mutual exclusion. An operation that suspends
    /// on a lookup commits a cart derived from what it read before
    /// suspending, overwriting anything committed in between.
    #[default]
    Interleaved,

    /// Each operation holds a store-wide lock from its first read to its
    /// commit.
    Serialized,
}

/// Cart store configuration.
///
/// Reads from environment variables:
/// - `CART_STORAGE_KEY`: persistence key (default: `"@RocketShoes:cart"`)
/// - `CART_SERIALIZE_OPERATIONS`: `true`/`1` selects
///   [`ConcurrencyMode::Serialized`] (default: interleaved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_key: String,
    pub concurrency: ConcurrencyMode,
}

impl CartConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage_key = lookup("CART_STORAGE_KEY")
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let concurrency = match lookup("CART_SERIALIZE_OPERATIONS").as_deref().map(str::trim) {
            Some("1" | "true" | "TRUE" | "True") => ConcurrencyMode::Serialized,
            _ => ConcurrencyMode::Interleaved,
        };
        Self {
            storage_key,
            concurrency,
        }
    }

    /// Returns the config with a different concurrency mode.
    pub fn with_concurrency(mut self, concurrency: ConcurrencyMode) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Returns the config with a different storage key.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            concurrency: ConcurrencyMode::Interleaved,
        }
    }
}
