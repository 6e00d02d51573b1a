//! # Shop API Service
//!
//! Data-access boundary to the remote storefront service: loads the product
//! catalog and submits completed orders.

use crate::config::{ShopConfig, ORDERS_PATH, PRODUCTS_PATH};
use crate::shop::models::{Order, Product};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures talking to the remote service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// List wrapper the service returns for collections
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListResponse<T> {
    #[serde(default)]
    pub total: u64,
    pub items: Vec<T>,
}

/// Acknowledgement of a submitted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: String,
    /// Amount charged, when the service reports it
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the catalog and order endpoints
#[derive(Debug, Clone)]
pub struct ShopApi {
    client: reqwest::Client,
    api_url: String,
    cdn_url: String,
}

impl ShopApi {
    pub fn new(config: &ShopConfig) -> Result<Self> {
        tracing::debug!(
            "Creating ShopApi for {} (images from {})",
            config.api_url,
            config.cdn_url
        );
        let client = reqwest::Client::builder()
            .user_agent(concat!("shopline/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            cdn_url: config.cdn_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Fetch the whole catalog, with image paths resolved against the CDN
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(PRODUCTS_PATH);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let list: ApiListResponse<serde_json::Value> = Self::handle_response(response).await?;

        // A malformed entry is dropped on its own instead of failing the whole list
        let products: Vec<Product> = list
            .items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Product>(item) {
                Ok(product) => Some(Product {
                    image: format!("{}{}", self.cdn_url, product.image),
                    ..product
                }),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog entry: {}", e);
                    None
                }
            })
            .collect();
        tracing::info!("Fetched {} of {} products", products.len(), list.total);

        Ok(products)
    }

    /// Submit an order record
    pub async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        let url = self.endpoint(ORDERS_PATH);
        tracing::debug!("POST {} ({} items, total {})", url, order.items.len(), order.total);

        let response = self.client.post(&url).json(order).send().await?;
        Self::handle_response(response).await
    }

    /// Decode a success body, or turn an error status into `ApiError::Status`
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
        tracing::warn!("Request failed with {}: {}", status.as_u16(), message);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
