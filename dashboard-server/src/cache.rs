//! In-memory caching of feed responses.
//!
//! The dashboard page asks for trains, status and updates within the same
//! second, and the poller may fire at the same time. A short-lived cache
//! lets all of them share one upstream request.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;

use crate::feed::{FeedError, RawFeed, TrainClient};

/// Cached feed response and when it was fetched.
type TrainsEntry = (Arc<RawFeed>, DateTime<Utc>);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 16,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// A feed response and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub feed: Arc<RawFeed>,
    pub fetched_at: DateTime<Utc>,
    pub cached: bool,
}

/// Train feed client with caching.
///
/// Responses are keyed by endpoint URL, so one client has at most one live
/// entry.
pub struct CachedTrainClient {
    client: TrainClient,
    trains: MokaCache<String, TrainsEntry>,
}

impl CachedTrainClient {
    /// Create a new cached client.
    pub fn new(client: TrainClient, config: &CacheConfig) -> Self {
        let trains = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, trains }
    }

    /// Get all trains, using the cache if available.
    pub async fn get_trains(&self) -> Result<CachedResponse, FeedError> {
        let key = self.client.endpoint().to_string();

        if let Some((feed, fetched_at)) = self.trains.get(&key).await {
            return Ok(CachedResponse {
                feed,
                fetched_at,
                cached: true,
            });
        }

        let feed = Arc::new(self.client.fetch_raw().await?);
        let fetched_at = Utc::now();
        self.trains.insert(key, (feed.clone(), fetched_at)).await;

        Ok(CachedResponse {
            feed,
            fetched_at,
            cached: false,
        })
    }

    /// Access the underlying client for requests that bypass the cache.
    pub fn client(&self) -> &TrainClient {
        &self.client
    }

    /// Drop any cached response so the next call hits the feed.
    pub fn invalidate(&self) {
        self.trains.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.trains.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTrainRecord;
    use crate::feed::FeedConfig;

    fn client() -> CachedTrainClient {
        let config = FeedConfig::new("key")
            .with_base_url("http://127.0.0.1:9/traindata")
            .with_timeout(2);
        CachedTrainClient::new(TrainClient::new(config).unwrap(), &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(15));
        assert_eq!(config.max_capacity, 16);
    }

    #[tokio::test]
    async fn served_from_cache_after_insert() {
        let client = client();
        let key = client.client().endpoint().to_string();
        let feed = Arc::new(RawFeed::from(vec![RawTrainRecord {
            train_id: Some("101".into()),
            ..Default::default()
        }]));
        let fetched_at = Utc::now() - chrono::TimeDelta::seconds(5);
        client.trains.insert(key, (feed, fetched_at)).await;

        let response = client.get_trains().await.unwrap();
        assert!(response.cached);
        assert_eq!(response.feed.records.len(), 1);
        assert_eq!(response.fetched_at, fetched_at);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let client = client();
        assert!(client.get_trains().await.is_err());
        client.trains.run_pending_tasks().await;
        assert_eq!(client.entry_count(), 0);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let client = client();
        let key = client.client().endpoint().to_string();
        client
            .trains
            .insert(key, (Arc::new(RawFeed::default()), Utc::now()))
            .await;

        client.invalidate();
        assert!(client.get_trains().await.is_err());
    }
}
