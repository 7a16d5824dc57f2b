// cartstore/src/store/contexts.rs

//! Per-operation data the cart pipelines run over. Handlers receive these
//! wrapped in `ContextData`.

use crate::model::{Cart, ProductId};
use crate::services::{CatalogService, StockService};
use crate::store::ledger::{CartLedger, CartSnapshot};
use std::sync::Arc;

/// Collaborators every cart pipeline reaches through its context.
#[derive(Clone)]
pub struct CartDeps {
  pub catalog: Arc<dyn CatalogService>,
  pub stock: Arc<dyn StockService>,
  pub ledger: Arc<CartLedger>,
}

/// Progress of a mutation: the snapshot it started from, the cart it wants to
/// commit, and what was actually committed.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
  pub snapshot: Option<CartSnapshot>,
  pub staged: Option<Cart>,
  pub committed: Option<CartSnapshot>,
}

/// Shared surface of the operation contexts, used by the common steps.
pub trait CartMutation: Send + Sync + 'static {
  fn deps(&self) -> &CartDeps;
  fn product_id(&self) -> ProductId;
  fn mutation(&self) -> &MutationState;
  fn mutation_mut(&mut self) -> &mut MutationState;
}

pub struct AddProductCtx {
  pub deps: CartDeps,
  pub product_id: ProductId,
  /// Amount already in the cart when the snapshot was taken, `None` for a new
  /// line item.
  pub existing_amount: Option<u32>,
  pub mutation: MutationState,
}

pub struct RemoveProductCtx {
  pub deps: CartDeps,
  pub product_id: ProductId,
  pub mutation: MutationState,
}

pub struct UpdateAmountCtx {
  pub deps: CartDeps,
  pub product_id: ProductId,
  pub requested: i64,
  /// `requested` as a quantity, set once it has been validated as positive.
  pub target: Option<u32>,
  pub mutation: MutationState,
}

impl AddProductCtx {
  pub fn new(deps: CartDeps, product_id: ProductId) -> Self {
    Self {
      deps,
      product_id,
      existing_amount: None,
      mutation: MutationState::default(),
    }
  }
}

impl RemoveProductCtx {
  pub fn new(deps: CartDeps, product_id: ProductId) -> Self {
    Self {
      deps,
      product_id,
      mutation: MutationState::default(),
    }
  }
}

impl UpdateAmountCtx {
  pub fn new(deps: CartDeps, product_id: ProductId, requested: i64) -> Self {
    Self {
      deps,
      product_id,
      requested,
      target: None,
      mutation: MutationState::default(),
    }
  }
}

macro_rules! impl_cart_mutation {
  ($($ctx:ty),+ $(,)?) => {
    $(
      impl CartMutation for $ctx {
        fn deps(&self) -> &CartDeps {
          &self.deps
        }

        fn product_id(&self) -> ProductId {
          self.product_id
        }

        fn mutation(&self) -> &MutationState {
          &self.mutation
        }

        fn mutation_mut(&mut self) -> &mut MutationState {
          &mut self.mutation
        }
      }
    )+
  };
}

impl_cart_mutation!(AddProductCtx, RemoveProductCtx, UpdateAmountCtx);
