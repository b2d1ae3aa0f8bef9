//! Route polylines for drawing lines on the map.

use std::collections::BTreeMap;

use crate::domain::{GeoPoint, Line};

use super::StationRegistry;

/// Coordinates of a line's stations in route order.
///
/// Names in the line's sequence that are not registered are skipped, so a
/// catalog referencing a missing station still draws the rest of the line.
pub fn polyline_for(registry: &StationRegistry, line: Line) -> Vec<GeoPoint> {
    registry
        .line_sequence(line)
        .iter()
        .filter_map(|name| registry.get(name.as_str()))
        .map(|station| station.location)
        .collect()
}

/// Polylines for every line, keyed by line.
pub fn route_polylines(registry: &StationRegistry) -> BTreeMap<Line, Vec<GeoPoint>> {
    Line::ALL
        .into_iter()
        .map(|line| (line, polyline_for(registry, line)))
        .collect()
}
