//! Last good feed response, kept on disk.
//!
//! Every fresh live batch is written here together with the time it was
//! fetched. During an outage that batch is served again, stamped with its
//! original fetch time, until it is older than the TTL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RawTrainRecord;

use super::error::FeedError;

/// Default fallback lifetime: 1 hour.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// A batch read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBatch {
    /// When the live feed returned this batch
    pub fetched_at: DateTime<Utc>,
    pub trains: Vec<RawTrainRecord>,
}

/// Where the fallback file lives and how long it stays usable.
#[derive(Debug, Clone)]
pub struct FeedCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl FeedCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for FeedCacheConfig {
    fn default() -> Self {
        Self::new("cache/train_data.json")
    }
}

/// Fallback store for the last good live batch.
#[derive(Debug, Clone)]
pub struct FeedCache {
    config: FeedCacheConfig,
}

impl FeedCache {
    pub fn new(config: FeedCacheConfig) -> Self {
        Self { config }
    }

    /// The stored batch, if there is one younger than the TTL.
    ///
    /// A missing or unreadable file is the same as an empty cache.
    pub fn load(&self) -> Option<StoredBatch> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let stored: StoredBatch = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unreadable train cache");
                return None;
            }
        };

        // A timestamp in the future (clock change) counts as fresh.
        if let Ok(age) = (Utc::now() - stored.fetched_at).to_std()
            && age >= self.config.ttl
        {
            tracing::debug!(age_secs = age.as_secs(), "train cache expired");
            return None;
        }

        Some(stored)
    }

    /// Store a batch fetched at `fetched_at`.
    ///
    /// The file is replaced through a temporary sibling so a crash never
    /// leaves half a batch behind.
    pub fn save(
        &self,
        trains: &[RawTrainRecord],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), FeedError> {
        let path = &self.config.path;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| FeedError::Cache {
                message: format!("cannot create {}: {e}", dir.display()),
            })?;
        }

        let stored = StoredBatch {
            fetched_at,
            trains: trains.to_vec(),
        };
        let json = serde_json::to_vec(&stored).map_err(|e| FeedError::Cache {
            message: format!("cannot encode train cache: {e}"),
        })?;

        let staging = path.with_extension("tmp");
        std::fs::write(&staging, json)
            .and_then(|()| std::fs::rename(&staging, path))
            .map_err(|e| FeedError::Cache {
                message: format!("cannot write {}: {e}", path.display()),
            })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
