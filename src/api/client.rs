//! HTTP client for the museum object API.
//!
//! Stateless apart from the pooled reqwest client; every search is one GET.

use std::time::Duration;

use async_trait::async_trait;

use crate::api::protocol::{object_query_url, SearchResult};
use crate::api::SearchClient;
use crate::config::ApiConfig;
use crate::{FeatureError, Result};

/// Object API client.
#[derive(Clone)]
pub struct MuseumClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MuseumClient {
    /// Create a client from API settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client can't be built (TLS backend failure).
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.is_empty() {
            tracing::warn!("No API key configured; searches will be rejected by the API");
        }

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch a page URL taken from a previous result's `info.next`/`info.prev`.
    ///
    /// # Errors
    /// Returns error if the request fails or the body isn't JSON.
    pub async fn fetch_page(&self, url: &str) -> Result<SearchResult> {
        tracing::debug!("Fetching page {}", url);
        let url = reqwest::Url::parse(url)
            .map_err(|e| FeatureError::Search(format!("Invalid page URL {}: {}", url, e)))?;
        self.get(url).await
    }

    async fn get(&self, url: reqwest::Url) -> Result<SearchResult> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeatureError::Search(format!("HTTP {}", status)));
        }

        Ok(response.json::<SearchResult>().await?)
    }
}

#[async_trait]
impl SearchClient for MuseumClient {
    async fn search(&self, term: &str, value: &str) -> Result<SearchResult> {
        let url = object_query_url(&self.base_url, &self.api_key, term, value)?;
        tracing::info!("Searching {}={}", term, value);
        self.get(url).await
    }
}
