// cartstore/src/store/pipelines.rs

//! Wiring of the three cart operations as step pipelines.

use crate::core::{ContextData, SkipCondition};
use crate::error::{CartError, PipelineError};
use crate::pipeline::Pipeline;
use crate::store::contexts::{AddProductCtx, RemoveProductCtx, UpdateAmountCtx};
use crate::store::steps;
use std::sync::Arc;

pub struct CartPipelines {
  pub add: Pipeline<AddProductCtx, CartError>,
  pub remove: Pipeline<RemoveProductCtx, CartError>,
  pub update: Pipeline<UpdateAmountCtx, CartError>,
}

impl CartPipelines {
  pub fn build() -> Result<Self, PipelineError> {
    Ok(Self {
      add: add_product_pipeline()?,
      remove: remove_product_pipeline()?,
      update: update_amount_pipeline()?,
    })
  }
}

fn skip_when_new_item() -> SkipCondition<AddProductCtx> {
  Arc::new(|ctx: ContextData<AddProductCtx>| ctx.read().existing_amount.is_none())
}

fn skip_when_existing_item() -> SkipCondition<AddProductCtx> {
  Arc::new(|ctx: ContextData<AddProductCtx>| ctx.read().existing_amount.is_some())
}

/// `snapshot_cart → check_stock → fetch_product → persist_cart`
///
/// Exactly one of `check_stock` (item already in the cart) and
/// `fetch_product` (first unit) runs.
pub fn add_product_pipeline() -> Result<Pipeline<AddProductCtx, CartError>, PipelineError> {
  let mut p = Pipeline::<AddProductCtx, CartError>::new(&[
    ("snapshot_cart", false, None),
    ("check_stock", false, Some(skip_when_new_item())),
    ("fetch_product", false, Some(skip_when_existing_item())),
    ("persist_cart", false, None),
  ]);

  p.on_step("snapshot_cart", steps::snapshot_cart::<AddProductCtx>)?;
  p.on_step("snapshot_cart", steps::note_existing_item)?;
  p.on_step("check_stock", steps::check_stock_for_add)?;
  p.on_step("fetch_product", steps::fetch_product)?;
  p.on_step("persist_cart", steps::persist_cart::<AddProductCtx>)?;
  p.after_step("persist_cart", steps::log_commit::<AddProductCtx>)?;
  Ok(p)
}

/// `snapshot_cart → detach_item → persist_cart`
pub fn remove_product_pipeline() -> Result<Pipeline<RemoveProductCtx, CartError>, PipelineError> {
  let mut p = Pipeline::<RemoveProductCtx, CartError>::new(&[
    ("snapshot_cart", false, None),
    ("detach_item", false, None),
    ("persist_cart", false, None),
  ]);

  p.on_step("snapshot_cart", steps::snapshot_cart::<RemoveProductCtx>)?;
  p.on_step("detach_item", steps::detach_item)?;
  p.on_step("persist_cart", steps::persist_cart::<RemoveProductCtx>)?;
  p.after_step("persist_cart", steps::log_commit::<RemoveProductCtx>)?;
  Ok(p)
}

/// `validate_amount → snapshot_cart → check_stock → persist_cart`
pub fn update_amount_pipeline() -> Result<Pipeline<UpdateAmountCtx, CartError>, PipelineError> {
  let mut p = Pipeline::<UpdateAmountCtx, CartError>::new(&[
    ("validate_amount", false, None),
    ("snapshot_cart", false, None),
    ("check_stock", false, None),
    ("persist_cart", false, None),
  ]);

  p.on_step("validate_amount", steps::validate_amount)?;
  p.on_step("snapshot_cart", steps::snapshot_cart::<UpdateAmountCtx>)?;
  p.after_step("snapshot_cart", steps::require_item)?;
  p.on_step("check_stock", steps::check_stock_for_update)?;
  p.on_step("persist_cart", steps::persist_cart::<UpdateAmountCtx>)?;
  p.after_step("persist_cart", steps::log_commit::<UpdateAmountCtx>)?;
  Ok(p)
}
