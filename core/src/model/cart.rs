// cartstore/src/model/cart.rs

//! Cart line items and the immutable `Cart` value.
//!
//! A `Cart` is never edited in place: every `with_*` / `without` method returns
//! a new value, and the store swaps snapshots wholesale on commit.

use super::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// One line of the cart: a snapshot of the product taken on first add, plus
/// the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: ProductId,
  pub title: String,
  pub price: Price,
  pub image: String,
  pub amount: u32,
}

impl CartItem {
  pub fn from_product(product: &Product, amount: u32) -> Self {
    CartItem {
      id: product.id,
      title: product.title.clone(),
      price: product.price,
      image: product.image.clone(),
      amount,
    }
  }

  pub fn subtotal(&self) -> Price {
    self.price.times(self.amount)
  }
}

/// Rejected cart contents, e.g. a stored cart that was edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
  #[error("product {0} appears more than once")]
  DuplicateItem(ProductId),
  #[error("product {0} has an amount of zero")]
  ZeroAmount(ProductId),
}

/// Ordered line items, unique by product id, each with `amount >= 1`.
///
/// Serializes as a bare JSON array of items. Deserialization re-checks the
/// invariants, so a stored array that breaks them is refused as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
  items: Vec<CartItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_items(items: Vec<CartItem>) -> Result<Self, InvalidCart> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
      if item.amount == 0 {
        return Err(InvalidCart::ZeroAmount(item.id));
      }
      if !seen.insert(item.id) {
        return Err(InvalidCart::DuplicateItem(item.id));
      }
    }
    Ok(Cart { items })
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  /// Number of distinct line items.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
    self.items.iter().find(|item| item.id == product_id)
  }

  pub fn contains(&self, product_id: ProductId) -> bool {
    self.get(product_id).is_some()
  }

  /// Sum of all amounts.
  pub fn total_units(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.amount)).sum()
  }

  pub fn total(&self) -> Price {
    self.items.iter().map(CartItem::subtotal).sum()
  }

  /// Amount in the cart per product id, for badges on product listings.
  pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
    self.items.iter().map(|item| (item.id, item.amount)).collect()
  }

  /// A copy with `item` appended. `None` if the product is already present or
  /// the amount is zero.
  pub fn with_item(&self, item: CartItem) -> Option<Cart> {
    if item.amount == 0 || self.contains(item.id) {
      return None;
    }
    let mut items = self.items.clone();
    items.push(item);
    Some(Cart { items })
  }

  /// A copy with the amount of `product_id` replaced, position preserved.
  /// `None` if the product is absent or `amount` is zero.
  pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Cart> {
    if amount == 0 || !self.contains(product_id) {
      return None;
    }
    let items = self
      .items
      .iter()
      .map(|item| {
        if item.id == product_id {
          CartItem {
            amount,
            ..item.clone()
          }
        } else {
          item.clone()
        }
      })
      .collect();
    Some(Cart { items })
  }

  /// A copy without `product_id`. `None` if it was not in the cart.
  pub fn without(&self, product_id: ProductId) -> Option<Cart> {
    if !self.contains(product_id) {
      return None;
    }
    let items = self.items.iter().filter(|item| item.id != product_id).cloned().collect();
    Some(Cart { items })
  }
}

impl TryFrom<Vec<CartItem>> for Cart {
  type Error = InvalidCart;

  fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
    Cart::from_items(items)
  }
}

impl From<Cart> for Vec<CartItem> {
  fn from(cart: Cart) -> Self {
    cart.items
  }
}

impl<'a> IntoIterator for &'a Cart {
  type Item = &'a CartItem;
  type IntoIter = std::slice::Iter<'a, CartItem>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}
