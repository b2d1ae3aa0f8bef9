//! Live train records.
//!
//! The upstream rail feed returns loosely-typed JSON: every field is a
//! string (or occasionally a number), and any of them may be missing.
//! [`RawTrainRecord`] mirrors that shape exactly; [`TrainRecord`] is the
//! validated form the rest of the crate works with.

use serde::{Deserialize, Deserializer, Serialize};

use super::{GeoPoint, InvalidLine, Line};

/// Errors from validating a raw feed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required field was absent or blank
    #[error("missing required field {0}")]
    MissingField(&'static str),

    /// The LINE field did not name a known line
    #[error(transparent)]
    InvalidLine(#[from] InvalidLine),
}

/// One train entry as returned by the rail realtime feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawTrainRecord {
    #[serde(rename = "TRAIN_ID", default, deserialize_with = "lenient_string")]
    pub train_id: Option<String>,

    #[serde(rename = "LINE", default, deserialize_with = "lenient_string")]
    pub line: Option<String>,

    /// Next station, e.g. "FIVE POINTS STATION"
    #[serde(rename = "STATION", default, deserialize_with = "lenient_string")]
    pub station: Option<String>,

    #[serde(rename = "DESTINATION", default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,

    /// Human-readable arrival estimate, e.g. "Arriving" or "5 min"
    #[serde(rename = "WAITING_TIME", default, deserialize_with = "lenient_string")]
    pub waiting_time: Option<String>,

    #[serde(rename = "WAITING_SECONDS", default, deserialize_with = "lenient_string")]
    pub waiting_seconds: Option<String>,

    /// Delay in the form "T<seconds>S", e.g. "T420S"
    #[serde(rename = "DELAY", default, deserialize_with = "lenient_string")]
    pub delay: Option<String>,

    #[serde(rename = "DIRECTION", default, deserialize_with = "lenient_string")]
    pub direction: Option<String>,

    #[serde(rename = "EVENT_TIME", default, deserialize_with = "lenient_string")]
    pub event_time: Option<String>,

    #[serde(rename = "IS_REALTIME", default, deserialize_with = "lenient_string")]
    pub is_realtime: Option<String>,

    #[serde(rename = "LATITUDE", default, deserialize_with = "lenient_string")]
    pub latitude: Option<String>,

    #[serde(rename = "LONGITUDE", default, deserialize_with = "lenient_string")]
    pub longitude: Option<String>,
}

/// Accept a string, number or boolean and keep its text form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A validated live train record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRecord {
    pub train_id: String,
    pub line: Line,

    /// Raw next-station text from the feed (not necessarily canonical)
    pub station: String,

    /// Raw destination text from the feed
    pub destination: Option<String>,

    pub waiting_time: Option<String>,
    pub waiting_seconds: Option<i64>,

    /// Signed delay in seconds; negative means early
    pub delay_secs: Option<i64>,

    pub direction: Option<String>,
    pub event_time: Option<String>,
    pub is_realtime: Option<bool>,

    /// Reported vehicle position, if both coordinates parsed
    pub position: Option<GeoPoint>,
}

impl TrainRecord {
    /// Validate a raw record.
    ///
    /// `TRAIN_ID`, `LINE` and `STATION` are required. Optional fields that
    /// fail to parse are dropped rather than rejecting the record.
    pub fn from_raw(raw: &RawTrainRecord) -> Result<Self, RecordError> {
        let train_id = required(&raw.train_id, "TRAIN_ID")?;
        let line = Line::parse(&required(&raw.line, "LINE")?)?;
        let station = required(&raw.station, "STATION")?;

        let latitude = parse_number::<f64>(&raw.latitude);
        let longitude = parse_number::<f64>(&raw.longitude);
        let position = match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        Ok(Self {
            train_id,
            line,
            station,
            destination: optional(&raw.destination),
            waiting_time: optional(&raw.waiting_time),
            waiting_seconds: parse_number(&raw.waiting_seconds),
            delay_secs: raw.delay.as_deref().and_then(parse_delay),
            direction: optional(&raw.direction),
            event_time: optional(&raw.event_time),
            is_realtime: raw.is_realtime.as_deref().and_then(parse_bool),
            position,
        })
    }
}

fn required(field: &Option<String>, name: &'static str) -> Result<String, RecordError> {
    optional(field).ok_or(RecordError::MissingField(name))
}

fn optional(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_number<T: std::str::FromStr>(field: &Option<String>) -> Option<T> {
    field.as_deref().and_then(|s| s.trim().parse().ok())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a feed delay of the form `T<seconds>S` into signed seconds.
///
/// # Examples
///
/// ```
/// use dashboard_server::domain::parse_delay;
///
/// assert_eq!(parse_delay("T420S"), Some(420));
/// assert_eq!(parse_delay("T-30S"), Some(-30));
/// assert_eq!(parse_delay("420"), None);
/// ```
pub fn parse_delay(s: &str) -> Option<i64> {
    s.trim()
        .strip_prefix('T')?
        .strip_suffix('S')?
        .parse()
        .ok()
}
