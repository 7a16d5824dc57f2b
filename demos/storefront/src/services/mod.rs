// demos/storefront/src/services/mod.rs

pub mod api;
pub mod console_sink;

pub use api::{ApiClient, HttpCatalog, HttpStock};
pub use console_sink::ConsoleSink;
