use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::models::listing::{Listing, NewListing};

/// Transport faults, timeouts, non-success statuses and undecodable bodies
/// all land here.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Catalog unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        Self::StorageUnavailable(reason)
    }
}

/// Calls the controller makes against the catalog backend.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Listing>, ClientError>;

    /// `query` is sent as-is; callers skip the call for empty text.
    async fn search(&self, query: &str) -> Result<Vec<Listing>, ClientError>;

    async fn insert(&self, fields: NewListing) -> Result<Listing, ClientError>;
}

#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::StorageUnavailable(format!("invalid base URL: {e}")))?;

        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mobilestore/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::StorageUnavailable(format!("invalid endpoint {path}: {e}")))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::StorageUnavailable(format!(
                "catalog API error: {} - {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(&self) -> Result<Vec<Listing>, ClientError> {
        let url = self.endpoint("api/products")?;
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Listing>, ClientError> {
        let url = self.endpoint(&format!(
            "api/products/search?query={}",
            urlencoding::encode(query)
        ))?;
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn insert(&self, fields: NewListing) -> Result<Listing, ClientError> {
        let url = self.endpoint("api/products")?;
        let response = self.client.post(url).json(&fields).send().await?;
        Self::decode(response).await
    }
}
