//! Validate raw feed records at the boundary.

use serde_json::Value;

use crate::domain::{RawTrainRecord, TrainRecord};

/// One feed response, decoded element by element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeed {
    /// Elements that decoded as train objects, in feed order
    pub records: Vec<RawTrainRecord>,

    /// Elements that were not train objects at all (`null`, strings, ...)
    pub undecodable: usize,
}

impl From<Vec<RawTrainRecord>> for RawFeed {
    fn from(records: Vec<RawTrainRecord>) -> Self {
        Self {
            records,
            undecodable: 0,
        }
    }
}

/// Decode a feed response body.
///
/// The body must be a JSON array. Elements that don't decode as a train
/// object are logged and counted, never fatal.
pub fn decode_feed(json: &str) -> Result<RawFeed, serde_json::Error> {
    let elements: Vec<Value> = serde_json::from_str(json)?;
    let mut feed = RawFeed::default();

    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<RawTrainRecord>(element) {
            Ok(record) => feed.records.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping undecodable feed element");
                feed.undecodable += 1;
            }
        }
    }

    Ok(feed)
}

/// Result of validating one feed response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedBatch {
    /// Records that passed validation, in feed order
    pub records: Vec<TrainRecord>,

    /// Number of records dropped
    pub rejected: usize,
}

/// Validate every raw record, dropping (and logging) the ones that fail.
pub fn convert_records(raw: &[RawTrainRecord]) -> ConvertedBatch {
    let mut batch = ConvertedBatch::default();

    for (index, record) in raw.iter().enumerate() {
        match TrainRecord::from_raw(record) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                tracing::warn!(
                    index,
                    train = record.train_id.as_deref().unwrap_or("?"),
                    error = %e,
                    "dropping malformed train record"
                );
                batch.rejected += 1;
            }
        }
    }

    batch
}

/// Validate a decoded response. Undecodable elements count as rejected.
pub fn convert_feed(feed: &RawFeed) -> ConvertedBatch {
    let mut batch = convert_records(&feed.records);
    batch.rejected += feed.undecodable;
    batch
}
