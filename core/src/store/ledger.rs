// cartstore/src/store/ledger.rs

//! The committed cart: one immutable snapshot, its revision, and the durable
//! copy kept in step with it.

use crate::error::{CartError, CartResult};
use crate::model::Cart;
use crate::services::KeyValueStore;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{event, Level};

/// A committed cart together with the number of commits that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
  pub cart: Arc<Cart>,
  pub revision: u64,
}

pub struct CartLedger {
  committed: RwLock<CartSnapshot>,
  /// Serializes committers. Held across the durable write so `committed` is
  /// only locked for the swap.
  commit_turn: Mutex<()>,
  storage: Arc<dyn KeyValueStore>,
  key: String,
}

impl std::fmt::Debug for CartLedger {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartLedger")
      .field("key", &self.key)
      .field("committed", &*self.committed.read())
      .finish()
  }
}

impl CartLedger {
  /// Loads the cart stored under `key`.
  ///
  /// A missing value, an unreadable store and a value that does not decode
  /// into a valid cart all start the ledger empty at revision 0.
  pub fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
    let key = key.into();
    let cart = match storage.get(&key) {
      Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
        Ok(cart) => {
          event!(Level::DEBUG, %key, items = cart.len(), "Stored cart loaded.");
          cart
        }
        Err(e) => {
          event!(Level::WARN, %key, error = %e, "Stored cart is corrupt, starting empty.");
          Cart::new()
        }
      },
      Ok(None) => {
        event!(Level::DEBUG, %key, "No stored cart, starting empty.");
        Cart::new()
      }
      Err(e) => {
        event!(Level::WARN, %key, error = %e, "Durable store unreadable, starting empty.");
        Cart::new()
      }
    };

    Self {
      committed: RwLock::new(CartSnapshot {
        cart: Arc::new(cart),
        revision: 0,
      }),
      commit_turn: Mutex::new(()),
      storage,
      key,
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn snapshot(&self) -> CartSnapshot {
    self.committed.read().clone()
  }

  /// Replaces the committed cart with `next`, provided nothing was committed
  /// since `expected_revision`.
  ///
  /// The durable store is written before the in-memory snapshot is swapped: a
  /// failed write leaves both untouched, and a stale revision writes nothing.
  /// Readers keep seeing the previous snapshot while the write is in progress.
  pub(crate) fn commit(&self, expected_revision: u64, next: Cart) -> CartResult<CartSnapshot> {
    let _turn = self.commit_turn.lock();
    let current_revision = self.committed.read().revision;
    if current_revision != expected_revision {
      event!(
        Level::WARN,
        expected_revision,
        current_revision,
        "Discarding stale cart completion."
      );
      return Err(CartError::StaleSnapshot {
        expected: expected_revision,
        current: current_revision,
      });
    }

    let encoded = serde_json::to_string(&next).map_err(|e| CartError::Persistence {
      key: self.key.clone(),
      source: e.into(),
    })?;
    self.storage.set(&self.key, &encoded).map_err(|source| CartError::Persistence {
      key: self.key.clone(),
      source,
    })?;

    let snapshot = CartSnapshot {
      cart: Arc::new(next),
      revision: current_revision + 1,
    };
    *self.committed.write() = snapshot.clone();
    Ok(snapshot)
  }
}
