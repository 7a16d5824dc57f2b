// demos/storefront/src/services/api.rs

//! Catalog and stock lookups over the storefront's JSON API.
//!
//! `GET /products/{id}`, `GET /products`, `GET /stock/{id}`, `GET /stock`.
//! A 404 is "not found"; any other failure (connection, timeout, non-2xx,
//! undecodable body) is returned as an error and treated as transient by the
//! cart store.

use crate::config::AppConfig;
use crate::errors::Result;
use anyhow::Context;
use async_trait::async_trait;
use cartstore::{CatalogService, Product, ProductId, StockEntry, StockService};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Shared HTTP transport. Request timeouts are configured here; the cart
/// store adds none of its own.
#[derive(Debug, Clone)]
pub struct ApiClient {
  base_url: String,
  client: Client,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      client,
    })
  }

  pub fn from_config(config: &AppConfig) -> Result<Self> {
    Self::new(config.api_url.clone(), config.http_timeout)
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// `Ok(None)` on 404.
  #[instrument(name = "ApiClient::get", skip(self))]
  async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<Option<T>> {
    let url = format!("{}/{}", self.base_url, path);
    let response = self.client.get(&url).send().await.with_context(|| format!("GET {}", url))?;
    if response.status() == StatusCode::NOT_FOUND {
      debug!(%url, "Resource not found.");
      return Ok(None);
    }
    let body = response
      .error_for_status()
      .with_context(|| format!("GET {}", url))?
      .json::<T>()
      .await
      .with_context(|| format!("decoding response of GET {}", url))?;
    Ok(Some(body))
  }

  async fn get_list<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<Vec<T>> {
    Ok(self.get_optional::<Vec<T>>(path).await?.unwrap_or_default())
  }
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
  api: ApiClient,
}

impl HttpCatalog {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }
}

#[async_trait]
impl CatalogService for HttpCatalog {
  async fn product(&self, id: ProductId) -> anyhow::Result<Option<Product>> {
    self.api.get_optional(&format!("products/{}", id)).await
  }

  async fn products(&self) -> anyhow::Result<Vec<Product>> {
    self.api.get_list("products").await
  }
}

#[derive(Debug, Clone)]
pub struct HttpStock {
  api: ApiClient,
}

impl HttpStock {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }
}

#[async_trait]
impl StockService for HttpStock {
  async fn stock(&self, id: ProductId) -> anyhow::Result<Option<StockEntry>> {
    self.api.get_optional(&format!("stock/{}", id)).await
  }

  async fn stock_levels(&self) -> anyhow::Result<Vec<StockEntry>> {
    self.api.get_list("stock").await
  }
}
