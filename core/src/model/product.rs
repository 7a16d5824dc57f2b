// cartstore/src/model/product.rs

use super::Price;
use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// A catalog entry as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub title: String,
  pub price: Price,
  pub image: String,
}

/// Units of a product available for purchase at the time it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
  pub id: ProductId,
  pub amount: u32,
}
