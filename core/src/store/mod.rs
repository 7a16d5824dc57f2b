// cartstore/src/store/mod.rs

//! The cart store: the only entry point for changing the cart.

pub mod config;
pub mod contexts;
pub mod ledger;
pub mod pipelines;
pub mod steps;

use crate::core::{ContextData, PipelineResult};
use crate::error::{CartError, CartOperation, CartResult};
use crate::model::{Cart, ProductId};
use crate::pipeline::Pipeline;
use crate::services::{CatalogService, KeyValueStore, NotificationSink, StockService};
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub use config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use contexts::{AddProductCtx, CartDeps, RemoveProductCtx, UpdateAmountCtx};
pub use ledger::{CartLedger, CartSnapshot};
pub use pipelines::CartPipelines;

/// Everything the store talks to, injected once at construction.
#[derive(Clone)]
pub struct CartServices {
  pub catalog: Arc<dyn CatalogService>,
  pub stock: Arc<dyn StockService>,
  pub storage: Arc<dyn KeyValueStore>,
  pub notifier: Arc<dyn NotificationSink>,
}

/// Holds the shopper's cart and applies add / remove / update requests to it.
///
/// Mutations queue up behind one async mutex, so each runs against the cart
/// left by the previous one even when its catalog or stock lookup is slow.
/// Readers go through [`CartStore::cart`] and never wait on that queue.
///
/// Every rejected operation is reported once to the notification sink and
/// returned to the caller; the cart and its stored copy stay as they were.
pub struct CartStore {
  deps: CartDeps,
  notifier: Arc<dyn NotificationSink>,
  pipelines: CartPipelines,
  mutation_queue: tokio::sync::Mutex<()>,
  config: CartConfig,
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("config", &self.config)
      .field("ledger", &self.deps.ledger)
      .finish_non_exhaustive()
  }
}

impl CartStore {
  /// Builds the store and loads the cart from durable storage.
  pub fn open(config: CartConfig, services: CartServices) -> CartResult<Self> {
    let ledger = Arc::new(CartLedger::load(services.storage, config.storage_key.clone()));
    let pipelines = CartPipelines::build()?;
    event!(Level::INFO, key = %config.storage_key, items = ledger.snapshot().cart.len(), "Cart store opened.");

    Ok(Self {
      deps: CartDeps {
        catalog: services.catalog,
        stock: services.stock,
        ledger,
      },
      notifier: services.notifier,
      pipelines,
      mutation_queue: tokio::sync::Mutex::new(()),
      config,
    })
  }

  /// The current cart. The returned value never changes; later mutations
  /// produce new snapshots.
  pub fn cart(&self) -> Arc<Cart> {
    self.deps.ledger.snapshot().cart
  }

  pub fn snapshot(&self) -> CartSnapshot {
    self.deps.ledger.snapshot()
  }

  /// Number of mutations committed since the store was opened.
  pub fn revision(&self) -> u64 {
    self.deps.ledger.snapshot().revision
  }

  pub fn config(&self) -> &CartConfig {
    &self.config
  }

  /// Adds one unit of `product_id`. A product already in the cart is checked
  /// against current stock; a new one is looked up in the catalog.
  #[instrument(name = "CartStore::add_product", skip(self))]
  pub async fn add_product(&self, product_id: ProductId) -> CartResult<()> {
    let ctx = ContextData::new(AddProductCtx::new(self.deps.clone(), product_id));
    self.execute(CartOperation::AddProduct, &self.pipelines.add, ctx).await
  }

  /// Drops the line item for `product_id`. Fails with `ItemNotInCart` when
  /// there is none.
  #[instrument(name = "CartStore::remove_product", skip(self))]
  pub async fn remove_product(&self, product_id: ProductId) -> CartResult<()> {
    let ctx = ContextData::new(RemoveProductCtx::new(self.deps.clone(), product_id));
    self.execute(CartOperation::RemoveProduct, &self.pipelines.remove, ctx).await
  }

  /// Sets the quantity of an item already in the cart to `amount`.
  ///
  /// `amount` is the target quantity, not a delta. Values `<= 0` are ignored
  /// without error.
  #[instrument(name = "CartStore::update_product_amount", skip(self))]
  pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> CartResult<()> {
    let ctx = ContextData::new(UpdateAmountCtx::new(self.deps.clone(), product_id, amount));
    self.execute(CartOperation::UpdateProductAmount, &self.pipelines.update, ctx).await
  }

  async fn execute<T>(
    &self,
    operation: CartOperation,
    pipeline: &Pipeline<T, CartError>,
    ctx: ContextData<T>,
  ) -> CartResult<()>
  where
    T: Send + Sync + 'static,
  {
    let _turn = self.mutation_queue.lock().await;
    match pipeline.run(ctx).await {
      Ok(PipelineResult::Completed) => Ok(()),
      Ok(PipelineResult::Stopped) => {
        event!(Level::DEBUG, operation = operation.as_str(), "Operation ended without changes.");
        Ok(())
      }
      Err(e) => {
        event!(Level::WARN, operation = operation.as_str(), error = %e, "Cart operation rejected.");
        self.notifier.error(e.user_message(operation));
        Err(e)
      }
    }
  }
}
