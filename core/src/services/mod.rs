// cartstore/src/services/mod.rs

//! Collaborators of the cart store.
//!
//! Lookups distinguish "not found" (`Ok(None)`) from a failed call (`Err`);
//! the store maps the former to `ProductNotFound` and the latter to
//! `TransientNetworkFailure`.

use crate::model::{Product, ProductId, StockEntry};
use async_trait::async_trait;

pub mod file_store;
pub mod memory;
pub mod notify;

pub use file_store::FileStore;
pub use memory::{MemoryCatalog, MemoryStock, MemoryStore};
pub use notify::{RecordingSink, TracingSink};

#[async_trait]
pub trait CatalogService: Send + Sync {
  async fn product(&self, id: ProductId) -> anyhow::Result<Option<Product>>;

  async fn products(&self) -> anyhow::Result<Vec<Product>>;
}

#[async_trait]
pub trait StockService: Send + Sync {
  async fn stock(&self, id: ProductId) -> anyhow::Result<Option<StockEntry>>;

  async fn stock_levels(&self) -> anyhow::Result<Vec<StockEntry>>;
}

/// Durable string storage, the equivalent of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Where user-visible error messages go. Must not block.
pub trait NotificationSink: Send + Sync {
  fn error(&self, message: &str);
}
