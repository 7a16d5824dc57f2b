// cartstore/src/lib.rs

//! cartstore: a shopper's cart with stock-validated mutations and
//! write-through persistence.
//!
//! The [`CartStore`] owns an ordered list of line items and changes it only
//! through three operations:
//!  - [`CartStore::add_product`]: one more unit, checked against stock for
//!    items already in the cart, copied from the catalog for new ones.
//!  - [`CartStore::remove_product`]: drops a line item.
//!  - [`CartStore::update_product_amount`]: sets a quantity, checked against
//!    stock.
//!
//! Each operation is a small step pipeline (see [`pipeline`]) run against a
//! fresh snapshot of the cart and committed with a revision check, so
//! concurrent calls never overwrite each other. Catalog, stock, storage and
//! notifications are traits in [`services`].

pub mod core;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod services;
pub mod store;

pub use crate::core::{ContextData, Handler, PipelineControl, PipelineResult, SkipCondition, StepDef};
pub use crate::error::{CartError, CartOperation, CartResult, PipelineError};
pub use crate::model::{Cart, CartItem, InvalidCart, Price, Product, ProductId, StockEntry};
pub use crate::pipeline::Pipeline;
pub use crate::services::{CatalogService, KeyValueStore, NotificationSink, StockService};
pub use crate::store::{CartConfig, CartServices, CartSnapshot, CartStore, DEFAULT_STORAGE_KEY};
