//! Share-info API client
//!
//! Each fetch builds its own HTTP session and drops it before returning, so
//! no connection outlives the call that opened it.

use crate::config::ShareApiConfig;
use crate::error::AppResult;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of raw share-info response bodies
#[async_trait]
pub trait ShareInfoSource: Send + Sync {
    /// Fetch the body for a share id
    ///
    /// Any error (connection, timeout, non-2xx) means the remote could not
    /// be consulted.
    async fn fetch(&self, share_id: &str) -> AppResult<String>;
}

/// reqwest-backed share-info client
#[derive(Debug, Clone)]
pub struct HttpShareInfoClient {
    endpoint: String,
    timeout: Duration,
}

impl HttpShareInfoClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ShareApiConfig) -> Self {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    /// Request URL for a share id (the id is passed through as-is)
    pub fn share_url(&self, share_id: &str) -> String {
        format!("{}?shareId={}", self.endpoint, share_id)
    }
}

#[async_trait]
impl ShareInfoSource for HttpShareInfoClient {
    async fn fetch(&self, share_id: &str) -> AppResult<String> {
        let session = Client::builder().timeout(self.timeout).build()?;

        let url = self.share_url(share_id);
        tracing::debug!(url = %url, "Fetching share info");

        let response = session.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(body)
    }
}
