// demos/storefront/src/commands.rs

//! Rendering for the read-only views. Mutating commands go straight to the
//! cart store and then reuse [`render_cart`].

use crate::errors::Result;
use crate::state::AppState;
use cartstore::{Cart, CatalogService, Product, StockService};
use std::collections::HashMap;
use std::fmt::Write;

/// One row of the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
  pub product: Product,
  pub in_stock: Option<u32>,
  pub in_cart: u32,
}

pub async fn catalog_rows(state: &AppState) -> Result<Vec<CatalogRow>> {
  let products = state.catalog.products().await?;
  let levels: HashMap<_, _> = state
    .stock
    .stock_levels()
    .await?
    .into_iter()
    .map(|entry| (entry.id, entry.amount))
    .collect();
  let in_cart = state.store.cart().amounts();

  Ok(
    products
      .into_iter()
      .map(|product| CatalogRow {
        in_stock: levels.get(&product.id).copied(),
        in_cart: in_cart.get(&product.id).copied().unwrap_or(0),
        product,
      })
      .collect(),
  )
}

pub fn render_catalog(rows: &[CatalogRow]) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{:>4}  {:<32} {:>10} {:>6} {:>8}", "ID", "PRODUCT", "PRICE", "STOCK", "IN CART");
  for row in rows {
    let stock = row.in_stock.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
      out,
      "{:>4}  {:<32} {:>10} {:>6} {:>8}",
      row.product.id, row.product.title, row.product.price, stock, row.in_cart
    );
  }
  out
}

pub fn render_cart(cart: &Cart) -> String {
  let mut out = String::new();
  if cart.is_empty() {
    out.push_str("Cart is empty.\n");
    return out;
  }
  let _ = writeln!(out, "{:>4}  {:<32} {:>10} {:>6} {:>10}", "ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL");
  for item in cart {
    let _ = writeln!(
      out,
      "{:>4}  {:<32} {:>10} {:>6} {:>10}",
      item.id,
      item.title,
      item.price,
      item.amount,
      item.subtotal()
    );
  }
  let _ = writeln!(
    out,
    "{} item(s), {} unit(s), total {}",
    cart.len(),
    cart.total_units(),
    cart.total()
  );
  out
}
