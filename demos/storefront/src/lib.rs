// demos/storefront/src/lib.rs

pub mod commands;
pub mod config;
pub mod errors;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
