// cartstore/examples/basic_cart.rs
//
// A cart over in-memory services: adds, an out-of-stock rejection, a quantity
// change, and a reload from the same storage.

use cartstore::services::{MemoryCatalog, MemoryStock, MemoryStore, TracingSink};
use cartstore::{CartConfig, CartError, CartServices, CartStore, Price, Product};
use std::sync::Arc;
use tracing::info;

fn product(id: u64, title: &str, cents: i64) -> Product {
  Product {
    id,
    title: title.to_string(),
    price: Price::from_cents(cents),
    image: format!("https://cdn.example.com/products/{}.jpg", id),
  }
}

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let storage = Arc::new(MemoryStore::new());
  let services = CartServices {
    catalog: Arc::new(MemoryCatalog::new([
      product(1, "Lightweight Walking Sneaker", 17990),
      product(2, "Trail Running Shoe", 13990),
    ])),
    stock: Arc::new(MemoryStock::new([(1, 2), (2, 5)])),
    storage: storage.clone(),
    notifier: Arc::new(TracingSink),
  };

  let store = CartStore::open(CartConfig::default(), services.clone())?;
  store.add_product(1).await?;
  store.add_product(1).await?;
  store.add_product(2).await?;

  // Only two units of product 1 are in stock; the sink logs the rejection.
  if let Err(e) = store.add_product(1).await {
    info!(error = %e, "Third unit refused");
  }

  store.update_product_amount(2, 4).await?;

  let reloaded = CartStore::open(CartConfig::default(), services)?;
  for item in reloaded.cart().items() {
    info!("{} x{} = {}", item.title, item.amount, item.subtotal());
  }
  info!("Total: {}", reloaded.cart().total());
  assert_eq!(*reloaded.cart(), *store.cart());

  Ok(())
}
