// tests/common/mod.rs
#![allow(dead_code)]

use cartstore::services::{MemoryCatalog, MemoryStock, MemoryStore, RecordingSink};
use cartstore::{CartConfig, CartServices, CartStore, Price, Product, ProductId, DEFAULT_STORAGE_KEY};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Catalog fixtures ---
pub fn product(id: ProductId, title: &str, cents: i64) -> Product {
  Product {
    id,
    title: title.to_string(),
    price: Price::from_cents(cents),
    image: format!("https://cdn.example.com/products/{}.jpg", id),
  }
}

pub fn sample_products() -> Vec<Product> {
  vec![
    product(1, "Lightweight Walking Sneaker", 17990),
    product(2, "Trail Running Shoe", 13990),
    product(3, "Leather Loafer", 21990),
    product(4, "Canvas Slip-On", 9990),
  ]
}

/// A store over in-memory collaborators, with handles kept for assertions.
pub struct Fixture {
  pub store: CartStore,
  pub catalog: Arc<MemoryCatalog>,
  pub stock: Arc<MemoryStock>,
  pub storage: Arc<MemoryStore>,
  pub sink: Arc<RecordingSink>,
}

impl Fixture {
  pub fn new(stock_levels: &[(ProductId, u32)]) -> Self {
    Self::with_storage(stock_levels, Arc::new(MemoryStore::new()))
  }

  /// Opens a store over `storage`, which may already hold a cart.
  pub fn with_storage(stock_levels: &[(ProductId, u32)], storage: Arc<MemoryStore>) -> Self {
    setup_tracing();
    let catalog = Arc::new(MemoryCatalog::new(sample_products()));
    let stock = Arc::new(MemoryStock::new(stock_levels.iter().copied()));
    let sink = Arc::new(RecordingSink::new());
    let store = CartStore::open(
      CartConfig::default(),
      CartServices {
        catalog: catalog.clone(),
        stock: stock.clone(),
        storage: storage.clone(),
        notifier: sink.clone(),
      },
    )
    .expect("cart pipelines should build");

    Self {
      store,
      catalog,
      stock,
      storage,
      sink,
    }
  }

  /// Reopens a fresh store over the same collaborators, as after a reload.
  pub fn reopen(&self) -> CartStore {
    CartStore::open(
      CartConfig::default(),
      CartServices {
        catalog: self.catalog.clone(),
        stock: self.stock.clone(),
        storage: self.storage.clone(),
        notifier: self.sink.clone(),
      },
    )
    .expect("cart pipelines should build")
  }

  pub fn stored_json(&self) -> Option<String> {
    self.storage.raw(DEFAULT_STORAGE_KEY)
  }

  /// `(id, amount)` pairs of the current cart, in order.
  pub fn lines(&self) -> Vec<(ProductId, u32)> {
    self.store.cart().items().iter().map(|item| (item.id, item.amount)).collect()
  }
}

/// Serialized cart of the given `(id, amount)` lines, using `sample_products`.
pub fn stored_cart_json(lines: &[(ProductId, u32)]) -> String {
  let products = sample_products();
  let items: Vec<serde_json::Value> = lines
    .iter()
    .map(|(id, amount)| {
      let p = products.iter().find(|p| p.id == *id).expect("fixture product");
      serde_json::json!({
        "id": p.id,
        "title": p.title,
        "price": p.price.as_decimal(),
        "image": p.image,
        "amount": amount,
      })
    })
    .collect();
  serde_json::Value::Array(items).to_string()
}

/// A fixture whose storage already holds a cart with `lines`.
pub fn fixture_with_cart(lines: &[(ProductId, u32)], stock_levels: &[(ProductId, u32)]) -> Fixture {
  let storage = Arc::new(MemoryStore::new());
  storage.insert_raw(DEFAULT_STORAGE_KEY, &stored_cart_json(lines));
  Fixture::with_storage(stock_levels, storage)
}
