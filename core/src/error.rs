// cartstore/src/error.rs

use crate::model::ProductId;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Configuration errors raised by the pipeline engine itself.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

/// Which store operation a failure belongs to. Picks the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
  AddProduct,
  RemoveProduct,
  UpdateProductAmount,
}

impl CartOperation {
  pub fn as_str(self) -> &'static str {
    match self {
      CartOperation::AddProduct => "add_product",
      CartOperation::RemoveProduct => "remove_product",
      CartOperation::UpdateProductAmount => "update_product_amount",
    }
  }

  fn failure_message(self) -> &'static str {
    match self {
      CartOperation::AddProduct => ADD_PRODUCT_FAILED,
      CartOperation::RemoveProduct => REMOVE_PRODUCT_FAILED,
      CartOperation::UpdateProductAmount => UPDATE_AMOUNT_FAILED,
    }
  }
}

pub const OUT_OF_STOCK: &str = "Requested quantity out of stock";
pub const ADD_PRODUCT_FAILED: &str = "Error adding product";
pub const REMOVE_PRODUCT_FAILED: &str = "Error removing product";
pub const UPDATE_AMOUNT_FAILED: &str = "Error updating product quantity";

/// Every way a cart operation can be rejected. None of them leave the cart or
/// the durable store changed.
#[derive(Debug, Error)]
pub enum CartError {
  #[error("Product {product_id} not found")]
  ProductNotFound { product_id: ProductId },

  #[error("Requested amount {requested} of product {product_id} exceeds available stock of {available}")]
  StockInsufficient {
    product_id: ProductId,
    requested: u32,
    available: u32,
  },

  #[error("Product {product_id} is not in the cart")]
  ItemNotInCart { product_id: ProductId },

  #[error("Lookup for product {product_id} failed. Source: {source}")]
  TransientNetworkFailure {
    product_id: ProductId,
    #[source]
    source: AnyhowError,
  },

  #[error("Failed to persist cart under key '{key}'. Source: {source}")]
  Persistence {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Cart changed while the operation was in flight (snapshot revision {expected}, current {current})")]
  StaleSnapshot { expected: u64, current: u64 },

  #[error("Cart pipeline error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl CartError {
  /// The fixed, user-facing message for this failure in the given operation.
  pub fn user_message(&self, operation: CartOperation) -> &'static str {
    match self {
      CartError::StockInsufficient { .. } => OUT_OF_STOCK,
      _ => operation.failure_message(),
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
