// cartstore/src/store/steps.rs

//! Step handlers of the cart pipelines.
//!
//! Every handler copies what it needs out of the context, drops the guard,
//! awaits its lookup, and only then locks again to record the result.

use crate::core::{ContextData, PipelineControl};
use crate::error::{CartError, CartResult, PipelineError};
use crate::model::{Cart, CartItem, ProductId, StockEntry};
use crate::services::StockService;
use crate::store::contexts::{AddProductCtx, CartMutation, RemoveProductCtx, UpdateAmountCtx};
use tracing::{event, instrument, Level};

// --- Lookups ---

pub(crate) async fn fetch_stock(stock: &dyn StockService, product_id: ProductId) -> CartResult<StockEntry> {
  match stock.stock(product_id).await {
    Ok(Some(entry)) => Ok(entry),
    Ok(None) => Err(CartError::ProductNotFound { product_id }),
    Err(source) => Err(CartError::TransientNetworkFailure { product_id, source }),
  }
}

fn ensure_within_stock(product_id: ProductId, requested: u32, stock: StockEntry) -> CartResult<()> {
  if requested > stock.amount {
    event!(
      Level::WARN,
      product_id,
      requested,
      available = stock.amount,
      "Requested amount exceeds stock."
    );
    return Err(CartError::StockInsufficient {
      product_id,
      requested,
      available: stock.amount,
    });
  }
  Ok(())
}

fn snapshot_cart_of<T: CartMutation>(ctx: &T, step_name: &str) -> CartResult<std::sync::Arc<Cart>> {
  ctx
    .mutation()
    .snapshot
    .as_ref()
    .map(|s| s.cart.clone())
    .ok_or_else(|| PipelineError::Internal(format!("step '{}' ran before snapshot_cart", step_name)).into())
}

// --- Shared steps ---

/// Pins the committed cart this operation will be judged against.
pub async fn snapshot_cart<T: CartMutation>(ctx_data: ContextData<T>) -> CartResult<PipelineControl> {
  let mut guard = ctx_data.write();
  let snapshot = guard.deps().ledger.snapshot();
  event!(Level::TRACE, revision = snapshot.revision, items = snapshot.cart.len(), "Cart snapshot taken.");
  guard.mutation_mut().snapshot = Some(snapshot);
  Ok(PipelineControl::Continue)
}

/// Commits the staged cart relative to the snapshot revision.
pub async fn persist_cart<T: CartMutation>(ctx_data: ContextData<T>) -> CartResult<PipelineControl> {
  let mut guard = ctx_data.write();
  let expected_revision = guard
    .mutation()
    .snapshot
    .as_ref()
    .map(|s| s.revision)
    .ok_or_else(|| PipelineError::Internal("persist_cart ran before snapshot_cart".to_string()))?;
  let staged = guard
    .mutation_mut()
    .staged
    .take()
    .ok_or_else(|| PipelineError::Internal("persist_cart found nothing staged".to_string()))?;

  let committed = guard.deps().ledger.commit(expected_revision, staged)?;
  guard.mutation_mut().committed = Some(committed);
  Ok(PipelineControl::Continue)
}

pub async fn log_commit<T: CartMutation>(ctx_data: ContextData<T>) -> CartResult<PipelineControl> {
  let guard = ctx_data.read();
  if let Some(committed) = &guard.mutation().committed {
    event!(
      Level::INFO,
      product_id = guard.product_id(),
      revision = committed.revision,
      items = committed.cart.len(),
      "Cart committed."
    );
  }
  Ok(PipelineControl::Continue)
}

// --- add_product ---

pub async fn note_existing_item(ctx_data: ContextData<AddProductCtx>) -> CartResult<PipelineControl> {
  let mut guard = ctx_data.write();
  let cart = snapshot_cart_of(&*guard, "note_existing_item")?;
  let product_id = guard.product_id;
  guard.existing_amount = cart.get(product_id).map(|item| item.amount);
  Ok(PipelineControl::Continue)
}

/// One more unit of a product already in the cart, bounded by current stock.
#[instrument(name = "step::check_stock_for_add", skip_all, err(Display))]
pub async fn check_stock_for_add(ctx_data: ContextData<AddProductCtx>) -> CartResult<PipelineControl> {
  let (stock, product_id, current) = {
    let guard = ctx_data.read();
    (guard.deps.stock.clone(), guard.product_id, guard.existing_amount.unwrap_or(0))
  };

  let entry = fetch_stock(stock.as_ref(), product_id).await?;
  let requested = current.saturating_add(1);
  ensure_within_stock(product_id, requested, entry)?;

  let mut guard = ctx_data.write();
  let cart = snapshot_cart_of(&*guard, "check_stock")?;
  guard.mutation.staged = cart.with_amount(product_id, requested);
  Ok(PipelineControl::Continue)
}

/// First unit of a product: copy its catalog entry into a new line item.
#[instrument(name = "step::fetch_product", skip_all, err(Display))]
pub async fn fetch_product(ctx_data: ContextData<AddProductCtx>) -> CartResult<PipelineControl> {
  let (catalog, product_id) = {
    let guard = ctx_data.read();
    (guard.deps.catalog.clone(), guard.product_id)
  };

  let product = match catalog.product(product_id).await {
    Ok(Some(product)) if product.id == product_id => product,
    Ok(Some(other)) => {
      event!(Level::WARN, product_id, returned_id = other.id, "Catalog answered with a different product.");
      return Err(CartError::ProductNotFound { product_id });
    }
    Ok(None) => return Err(CartError::ProductNotFound { product_id }),
    Err(source) => return Err(CartError::TransientNetworkFailure { product_id, source }),
  };

  let mut guard = ctx_data.write();
  let cart = snapshot_cart_of(&*guard, "fetch_product")?;
  guard.mutation.staged = cart.with_item(CartItem::from_product(&product, 1));
  Ok(PipelineControl::Continue)
}

// --- remove_product ---

pub async fn detach_item(ctx_data: ContextData<RemoveProductCtx>) -> CartResult<PipelineControl> {
  let mut guard = ctx_data.write();
  let cart = snapshot_cart_of(&*guard, "detach_item")?;
  let product_id = guard.product_id;
  let staged = cart.without(product_id).ok_or(CartError::ItemNotInCart { product_id })?;
  guard.mutation.staged = Some(staged);
  Ok(PipelineControl::Continue)
}

// --- update_product_amount ---

/// Non-positive targets end the operation quietly.
pub async fn validate_amount(ctx_data: ContextData<UpdateAmountCtx>) -> CartResult<PipelineControl> {
  let mut guard = ctx_data.write();
  if guard.requested <= 0 {
    event!(Level::DEBUG, product_id = guard.product_id, requested = guard.requested, "Ignoring non-positive amount.");
    return Ok(PipelineControl::Stop);
  }
  guard.target = Some(u32::try_from(guard.requested).unwrap_or(u32::MAX));
  Ok(PipelineControl::Continue)
}

pub async fn require_item(ctx_data: ContextData<UpdateAmountCtx>) -> CartResult<PipelineControl> {
  let guard = ctx_data.read();
  let cart = snapshot_cart_of(&*guard, "require_item")?;
  if !cart.contains(guard.product_id) {
    return Err(CartError::ItemNotInCart {
      product_id: guard.product_id,
    });
  }
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::check_stock_for_update", skip_all, err(Display))]
pub async fn check_stock_for_update(ctx_data: ContextData<UpdateAmountCtx>) -> CartResult<PipelineControl> {
  let (stock, product_id, target) = {
    let guard = ctx_data.read();
    let target = guard
      .target
      .ok_or_else(|| PipelineError::Internal("check_stock ran before validate_amount".to_string()))?;
    (guard.deps.stock.clone(), guard.product_id, target)
  };

  let entry = fetch_stock(stock.as_ref(), product_id).await?;
  ensure_within_stock(product_id, target, entry)?;

  let mut guard = ctx_data.write();
  let cart = snapshot_cart_of(&*guard, "check_stock")?;
  let staged = cart
    .with_amount(product_id, target)
    .ok_or(CartError::ItemNotInCart { product_id })?;
  guard.mutation.staged = Some(staged);
  Ok(PipelineControl::Continue)
}
