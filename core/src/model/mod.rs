// cartstore/src/model/mod.rs

pub mod cart;
pub mod price;
pub mod product;

pub use cart::{Cart, CartItem, InvalidCart};
pub use price::Price;
pub use product::{Product, ProductId, StockEntry};
