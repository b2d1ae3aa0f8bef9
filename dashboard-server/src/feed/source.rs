//! Where the dashboard gets its trains from.

use chrono::{DateTime, Utc};

use crate::cache::CachedTrainClient;
use crate::domain::TrainRecord;

use super::cache::FeedCache;
use super::convert::{ConvertedBatch, convert_feed, convert_records};
use super::error::FeedError;
use super::mock::MockTrainFeed;

/// Where a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrigin {
    /// Fresh from the live feed (or its short-lived response cache)
    Live,
    /// The live feed failed and the disk cache was used
    Fallback,
    /// Offline sample data
    Mock,
}

/// One validated batch of trains.
#[derive(Debug, Clone)]
pub struct FeedBatch {
    pub records: Vec<TrainRecord>,
    pub rejected: usize,
    pub origin: FeedOrigin,

    /// When the upstream feed produced this data. For fallback batches this
    /// is the time of the original live fetch, not the time of the outage.
    pub fetched_at: DateTime<Utc>,
}

impl FeedBatch {
    fn new(converted: ConvertedBatch, origin: FeedOrigin, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records: converted.records,
            rejected: converted.rejected,
            origin,
            fetched_at,
        }
    }
}

/// A source of live train records.
pub enum TrainFeed {
    /// The MARTA feed, with the last good response kept on disk
    Live {
        client: CachedTrainClient,
        fallback: FeedCache,
    },
    /// Fixed sample data
    Mock(MockTrainFeed),
}

impl TrainFeed {
    /// Fetch and validate the current trains.
    ///
    /// A failed live fetch falls back to the disk cache. The original error
    /// is returned only if there is no usable cached batch either.
    pub async fn fetch(&self) -> Result<FeedBatch, FeedError> {
        match self {
            TrainFeed::Live { client, fallback } => match client.get_trains().await {
                Ok(response) => {
                    if !response.cached
                        && let Err(e) =
                            fallback.save(&response.feed.records, response.fetched_at)
                    {
                        tracing::warn!(error = %e, "failed to write train cache");
                    }
                    Ok(FeedBatch::new(
                        convert_feed(&response.feed),
                        FeedOrigin::Live,
                        response.fetched_at,
                    ))
                }
                Err(e) => {
                    let Some(stored) = fallback.load() else {
                        return Err(e);
                    };
                    tracing::warn!(
                        error = %e,
                        cache = %fallback.path().display(),
                        fetched_at = %stored.fetched_at,
                        "live feed failed, serving cached trains"
                    );
                    Ok(FeedBatch::new(
                        convert_records(&stored.trains),
                        FeedOrigin::Fallback,
                        stored.fetched_at,
                    ))
                }
            },
            TrainFeed::Mock(mock) => Ok(FeedBatch::new(
                convert_feed(mock.feed()),
                FeedOrigin::Mock,
                Utc::now(),
            )),
        }
    }

    /// Force the next fetch to go upstream.
    pub fn invalidate(&self) {
        if let TrainFeed::Live { client, .. } = self {
            client.invalidate();
        }
    }
}
