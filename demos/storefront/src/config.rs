// demos/storefront/src/config.rs

use crate::errors::{AppError, Result};
use cartstore::DEFAULT_STORAGE_KEY;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_DATA_DIR: &str = ".storefront";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  /// Base URL of the catalog / stock API, without trailing slash.
  pub api_url: String,
  /// Directory holding the durable cart file.
  pub data_dir: PathBuf,
  pub cart_key: String,
  pub http_timeout: Duration,
  pub log_json: bool,
}

impl AppConfig {
  /// Reads `STOREFRONT_*` variables, after loading a `.env` file if present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let api_url = lookup("STOREFRONT_API_URL")
      .unwrap_or_else(|| DEFAULT_API_URL.to_string())
      .trim_end_matches('/')
      .to_string();
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
      return Err(AppError::Config(format!(
        "STOREFRONT_API_URL must be an http(s) URL, got '{}'",
        api_url
      )));
    }

    let data_dir = lookup("STOREFRONT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let cart_key = lookup("STOREFRONT_CART_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let timeout_secs = match lookup("STOREFRONT_HTTP_TIMEOUT_SECS") {
      Some(raw) => raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_HTTP_TIMEOUT_SECS: {}", e)))?,
      None => DEFAULT_TIMEOUT_SECS,
    };

    let log_json = lookup("STOREFRONT_LOG_JSON")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_LOG_JSON value: {}", e)))?;

    Ok(Self {
      api_url,
      data_dir,
      cart_key,
      http_timeout: Duration::from_secs(timeout_secs),
      log_json,
    })
  }
}
