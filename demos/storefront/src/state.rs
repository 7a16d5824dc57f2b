// demos/storefront/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{ApiClient, ConsoleSink, HttpCatalog, HttpStock};
use cartstore::services::FileStore;
use cartstore::{CartConfig, CartServices, CartStore};
use std::sync::Arc;

/// Wiring shared by every command: the cart store plus direct handles to the
/// catalog and stock clients for the listing views.
#[derive(Debug, Clone)]
pub struct AppState {
  pub store: Arc<CartStore>,
  pub catalog: Arc<HttpCatalog>,
  pub stock: Arc<HttpStock>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn build(config: AppConfig) -> Result<Self> {
    let api = ApiClient::from_config(&config)?;
    let catalog = Arc::new(HttpCatalog::new(api.clone()));
    let stock = Arc::new(HttpStock::new(api));
    let storage = Arc::new(FileStore::open(&config.data_dir)?);

    let store = CartStore::open(
      CartConfig::with_storage_key(config.cart_key.clone()),
      CartServices {
        catalog: catalog.clone(),
        stock: stock.clone(),
        storage,
        notifier: Arc::new(ConsoleSink),
      },
    )?;

    Ok(Self {
      store: Arc::new(store),
      catalog,
      stock,
      config: Arc::new(config),
    })
  }
}
