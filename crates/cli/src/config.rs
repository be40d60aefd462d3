//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use cart::CartConfig;

/// CLI configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CART_DATA_DIR`: directory holding the persisted cart (default: `".cart"`)
/// - `CART_CATALOG_PATH`: product fixture file (default: `"catalog.json"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
///
/// Store settings come from [`CartConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub log_level: String,
    pub cart: CartConfig,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("CART_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".cart")),
            catalog_path: std::env::var("CART_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("catalog.json")),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cart: CartConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".cart"),
            catalog_path: PathBuf::from("catalog.json"),
            log_level: "info".to_string(),
            cart: CartConfig::default(),
        }
    }
}
