//! Mock train feed for running without API access.
//!
//! Loads a sample feed response from a JSON file and serves it as if it
//! were live.

use std::path::Path;

use crate::domain::RawTrainRecord;

use super::convert::{RawFeed, decode_feed};
use super::error::FeedError;

/// Offline feed that serves a fixed set of trains.
#[derive(Debug, Clone)]
pub struct MockTrainFeed {
    feed: RawFeed,
}

impl MockTrainFeed {
    /// Load a feed response (a JSON array of train objects) from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| FeedError::Mock {
            message: format!("failed to read {path:?}: {e}"),
        })?;

        let feed = decode_feed(&json).map_err(|e| FeedError::Mock {
            message: format!("failed to parse {path:?}: {e}"),
        })?;

        tracing::info!(
            path = %path.display(),
            trains = feed.records.len(),
            undecodable = feed.undecodable,
            "loaded mock train feed"
        );

        Ok(Self { feed })
    }

    /// Serve the given records.
    pub fn from_records(trains: Vec<RawTrainRecord>) -> Self {
        Self { feed: trains.into() }
    }

    pub fn records(&self) -> &[RawTrainRecord] {
        &self.feed.records
    }

    pub fn feed(&self) -> &RawFeed {
        &self.feed
    }
}
