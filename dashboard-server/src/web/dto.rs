//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DisplayPosition, Line, Station};
use crate::session::{ResolvedTrain, StationMarker, TrainMarker};

/// A train in the train list.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    pub train_id: String,
    pub line: Line,

    /// Station text as reported by the feed
    pub station: String,

    /// Canonical station the text resolved to
    pub resolved_station: Option<String>,

    pub destination: Option<String>,
    pub waiting_time: Option<String>,
    pub waiting_seconds: Option<i64>,
    pub delay_secs: Option<i64>,
    pub direction: Option<String>,
    pub event_time: Option<String>,
    pub is_realtime: Option<bool>,

    /// Reported vehicle position as `[lat, lng]`
    pub position: Option<[f64; 2]>,
}

impl TrainResult {
    pub fn from_resolved(train: &ResolvedTrain) -> Self {
        let record = &train.record;
        Self {
            train_id: record.train_id.clone(),
            line: record.line,
            station: record.station.clone(),
            resolved_station: train.station.as_ref().map(|s| s.as_str().to_string()),
            destination: record.destination.clone(),
            waiting_time: record.waiting_time.clone(),
            waiting_seconds: record.waiting_seconds,
            delay_secs: record.delay_secs,
            direction: record.direction.clone(),
            event_time: record.event_time.clone(),
            is_realtime: record.is_realtime,
            position: record.position.map(|p| p.to_lat_lng()),
        }
    }
}

/// Response for the train list.
#[derive(Debug, Serialize)]
pub struct TrainsResponse {
    pub trains: Vec<TrainResult>,

    /// Number of trains in the snapshot before filtering
    pub total: usize,

    /// Selected station, if filtered
    pub filter: Option<String>,

    pub fetched_at: Option<DateTime<Utc>>,
}

/// A station in the catalog.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub location: [f64; 2],
    pub display: Option<DisplayPosition>,
    pub lines: Vec<Line>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.as_str().to_string(),
            location: station.location.to_lat_lng(),
            display: station.display,
            lines: station.lines.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Request to resolve free text to a station.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub query: String,

    /// Best match, if any
    pub station: Option<StationResult>,

    /// Names of every station the text matches, in registry order
    pub candidates: Vec<String>,
}

/// One line's route for the map.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub line: Line,
    pub color: &'static str,

    /// `[lat, lng]` points in route order
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Marker style for a station.
#[derive(Debug, Serialize)]
pub struct StationMarkerResult {
    pub name: String,
    pub location: [f64; 2],
    pub fill_color: &'static str,
    pub radius: u8,
    pub highlighted: bool,
}

impl From<&StationMarker<'_>> for StationMarkerResult {
    fn from(marker: &StationMarker<'_>) -> Self {
        Self {
            name: marker.station.name.as_str().to_string(),
            location: marker.station.location.to_lat_lng(),
            fill_color: marker.fill_color,
            radius: marker.radius,
            highlighted: marker.highlighted,
        }
    }
}

/// A train on the map.
#[derive(Debug, Serialize)]
pub struct TrainMarkerResult {
    pub train_id: String,
    pub line: Line,
    pub color: &'static str,
    pub station: String,
    pub destination: Option<String>,
    pub location: [f64; 2],
}

impl From<&TrainMarker<'_>> for TrainMarkerResult {
    fn from(marker: &TrainMarker<'_>) -> Self {
        Self {
            train_id: marker.train.train_id.clone(),
            line: marker.train.line,
            color: marker.train.line.color(),
            station: marker.station.name.as_str().to_string(),
            destination: marker.train.destination.clone(),
            location: marker.location.to_lat_lng(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub stations: Vec<StationMarkerResult>,
    pub trains: Vec<TrainMarkerResult>,
}

/// Request to filter on a station.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub station: String,
}

/// Current filter.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    /// Selected station, or `None` when showing all trains
    pub station: Option<StationResult>,
}

#[derive(Debug, Serialize)]
pub struct UpdatesResponse {
    pub updates: Vec<crate::status::ServiceUpdate>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
