//! Live train data.
//!
//! Fetches the MARTA rail realtime feed, keeps the last good response on
//! disk for outages, and validates records before they reach the session.

mod cache;
mod client;
mod convert;
mod error;
mod mock;
mod source;

pub use cache::{FeedCache, FeedCacheConfig, StoredBatch};
pub use client::{DEFAULT_BASE_URL, FeedConfig, TrainClient};
pub use convert::{ConvertedBatch, RawFeed, convert_feed, convert_records, decode_feed};
pub use error::FeedError;
pub use mock::MockTrainFeed;
pub use source::{FeedBatch, FeedOrigin, TrainFeed};
