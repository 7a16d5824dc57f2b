// demos/storefront/src/errors.rs

use cartstore::CartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("HTTP client error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Service Error: {0}")]
  Service(#[from] anyhow::Error),

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
