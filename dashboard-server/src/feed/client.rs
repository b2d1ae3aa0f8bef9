//! MARTA rail realtime HTTP client.

use std::time::Duration;

use super::convert::{RawFeed, decode_feed};
use super::error::FeedError;

/// Default endpoint for the MARTA rail realtime arrivals feed.
pub const DEFAULT_BASE_URL: &str = "https://developerservices.itsmarta.com:18096/itsmarta/railrealtimearrivals/developerservices/traindata";

/// Configuration for the train feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// API key, sent as the `apiKey` query parameter
    pub api_key: String,
    /// Full URL of the train data endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the MARTA rail realtime feed.
#[derive(Debug, Clone)]
pub struct TrainClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TrainClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Fetch every train currently reported by the feed, unvalidated.
    pub async fn fetch_raw(&self) -> Result<RawFeed, FeedError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FeedError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        decode_feed(&body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })
    }
}
