// demos/storefront/tests/config_tests.rs

use cartstore::DEFAULT_STORAGE_KEY;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use storefront::config::{DEFAULT_API_URL, DEFAULT_DATA_DIR};
use storefront::{AppConfig, AppError};

fn load(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
  let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  AppConfig::from_lookup(|name| map.get(name).cloned())
}

#[test]
fn test_defaults_apply_when_nothing_is_set() {
  let config = load(&[]).expect("defaults");
  assert_eq!(config.api_url, DEFAULT_API_URL);
  assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
  assert_eq!(config.cart_key, DEFAULT_STORAGE_KEY);
  assert_eq!(config.http_timeout, Duration::from_secs(10));
  assert!(!config.log_json);
}

#[test]
fn test_values_are_read_from_variables() {
  let config = load(&[
    ("STOREFRONT_API_URL", "https://shop.example.com/api/"),
    ("STOREFRONT_DATA_DIR", "/var/lib/storefront"),
    ("STOREFRONT_CART_KEY", "@shop:cart"),
    ("STOREFRONT_HTTP_TIMEOUT_SECS", "3"),
    ("STOREFRONT_LOG_JSON", "true"),
  ])
  .expect("config");

  assert_eq!(config.api_url, "https://shop.example.com/api");
  assert_eq!(config.data_dir, PathBuf::from("/var/lib/storefront"));
  assert_eq!(config.cart_key, "@shop:cart");
  assert_eq!(config.http_timeout, Duration::from_secs(3));
  assert!(config.log_json);
}

#[test]
fn test_malformed_values_are_config_errors() {
  for vars in [
    [("STOREFRONT_HTTP_TIMEOUT_SECS", "soon")],
    [("STOREFRONT_LOG_JSON", "yes please")],
    [("STOREFRONT_API_URL", "ftp://shop.example.com")],
  ] {
    match load(&vars) {
      Err(AppError::Config(_)) => {}
      other => panic!("expected a config error for {:?}, got {:?}", vars, other),
    }
  }
}
