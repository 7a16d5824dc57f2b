// cartstore/src/store/config.rs

/// Key the cart is stored under when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "@storefront:cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
  /// Namespaced key of the serialized cart in the durable store.
  pub storage_key: String,
}

impl CartConfig {
  pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
    Self {
      storage_key: storage_key.into(),
    }
  }
}

impl Default for CartConfig {
  fn default() -> Self {
    Self::with_storage_key(DEFAULT_STORAGE_KEY)
  }
}
