//! Station types.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use super::Line;

/// Error returned when a station name is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// Upper-case and trim a piece of station text.
///
/// Every comparison between feed text and station names goes through this.
pub fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// A canonical station name.
///
/// Canonical names are trimmed and upper-case, so two `StationName`s are
/// equal exactly when their normalized text is equal.
///
/// # Examples
///
/// ```
/// use dashboard_server::domain::StationName;
///
/// let name = StationName::parse("  Five Points ").unwrap();
/// assert_eq!(name.as_str(), "FIVE POINTS");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationName(String);

impl StationName {
    /// Parse and normalize a station name.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let name = normalize(s);
        if name.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }
        Ok(StationName(name))
    }

    /// Returns the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A real-world position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]`, the order Leaflet expects.
    pub fn to_lat_lng(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Position on the schematic rail map image, as percentages from the
/// top-left corner. Values past 100 sit off the edge of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayPosition {
    pub top: f64,
    pub left: f64,
}

/// A rail station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Canonical name
    pub name: StationName,

    /// Geographic position
    pub location: GeoPoint,

    /// Position on the schematic map, if it has one
    pub display: Option<DisplayPosition>,

    /// Lines serving this station (non-empty, no duplicates)
    pub lines: Vec<Line>,
}

impl Station {
    /// Whether the given line calls at this station.
    pub fn serves(&self, line: Line) -> bool {
        self.lines.contains(&line)
    }
}
