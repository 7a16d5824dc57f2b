// cartstore/src/services/memory.rs

//! In-process implementations of the collaborator traits.
//!
//! The catalog and stock services can be switched "offline" and given a fixed
//! latency, which is how tests reproduce failed and interleaved lookups.

use super::{CatalogService, KeyValueStore, StockService};
use crate::model::{Product, ProductId, StockEntry};
use anyhow::bail;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
struct SimulatedLink {
  offline: AtomicBool,
  latency: Mutex<Duration>,
  calls: AtomicUsize,
}

impl SimulatedLink {
  async fn call(&self, service: &str) -> anyhow::Result<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let latency = *self.latency.lock();
    if !latency.is_zero() {
      tokio::time::sleep(latency).await;
    }
    if self.offline.load(Ordering::SeqCst) {
      bail!("{} service is unreachable", service);
    }
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
  products: RwLock<BTreeMap<ProductId, Product>>,
  link: SimulatedLink,
}

impl MemoryCatalog {
  pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
    let catalog = Self::default();
    for product in products {
      catalog.insert(product);
    }
    catalog
  }

  pub fn insert(&self, product: Product) {
    self.products.write().insert(product.id, product);
  }

  pub fn set_offline(&self, offline: bool) {
    self.link.offline.store(offline, Ordering::SeqCst);
  }

  pub fn set_latency(&self, latency: Duration) {
    *self.link.latency.lock() = latency;
  }

  /// Lookups attempted so far, failed ones included.
  pub fn calls(&self) -> usize {
    self.link.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CatalogService for MemoryCatalog {
  async fn product(&self, id: ProductId) -> anyhow::Result<Option<Product>> {
    self.link.call("catalog").await?;
    Ok(self.products.read().get(&id).cloned())
  }

  async fn products(&self) -> anyhow::Result<Vec<Product>> {
    self.link.call("catalog").await?;
    Ok(self.products.read().values().cloned().collect())
  }
}

#[derive(Debug, Default)]
pub struct MemoryStock {
  levels: RwLock<BTreeMap<ProductId, u32>>,
  link: SimulatedLink,
}

impl MemoryStock {
  pub fn new(levels: impl IntoIterator<Item = (ProductId, u32)>) -> Self {
    Self {
      levels: RwLock::new(levels.into_iter().collect()),
      link: SimulatedLink::default(),
    }
  }

  pub fn set_amount(&self, id: ProductId, amount: u32) {
    self.levels.write().insert(id, amount);
  }

  pub fn remove(&self, id: ProductId) {
    self.levels.write().remove(&id);
  }

  pub fn set_offline(&self, offline: bool) {
    self.link.offline.store(offline, Ordering::SeqCst);
  }

  pub fn set_latency(&self, latency: Duration) {
    *self.link.latency.lock() = latency;
  }

  pub fn calls(&self) -> usize {
    self.link.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl StockService for MemoryStock {
  async fn stock(&self, id: ProductId) -> anyhow::Result<Option<StockEntry>> {
    self.link.call("stock").await?;
    Ok(self.levels.read().get(&id).map(|&amount| StockEntry { id, amount }))
  }

  async fn stock_levels(&self) -> anyhow::Result<Vec<StockEntry>> {
    self.link.call("stock").await?;
    Ok(
      self
        .levels
        .read()
        .iter()
        .map(|(&id, &amount)| StockEntry { id, amount })
        .collect(),
    )
  }
}

/// A `KeyValueStore` kept in a map. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
  fail_writes: AtomicBool,
  writes: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a value without counting it as a write.
  pub fn insert_raw(&self, key: &str, value: &str) {
    self.entries.lock().insert(key.to_string(), value.to_string());
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.entries.lock().get(key).cloned()
  }

  /// Successful `set` calls so far.
  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.raw(key))
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      bail!("storage quota exceeded while writing '{}'", key);
    }
    self.entries.lock().insert(key.to_string(), value.to_string());
    self.writes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}
