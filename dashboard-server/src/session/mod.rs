//! Dashboard session state.
//!
//! One [`DashboardSession`] lives for the lifetime of the dashboard. It owns
//! the station filter and the most recent batch of live train records, and
//! computes everything the map and card views draw from them.

mod filter;

pub use filter::FilterState;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{GeoPoint, Line, Station, StationName, TrainRecord};
use crate::network::{RegistryError, StationRegistry, route_polylines};

/// Fill colour of the selected station's marker.
pub const HIGHLIGHT_COLOR: &str = "#FFFF00";

/// Fill colour of a station with no train at it.
pub const IDLE_COLOR: &str = "#FFFFFF";

pub const STATION_RADIUS: u8 = 6;
pub const HIGHLIGHT_RADIUS: u8 = 8;

/// A train record paired with the station its text resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrain {
    pub record: TrainRecord,

    /// Canonical station, or `None` if the station text matched nothing
    pub station: Option<StationName>,
}

/// The trains from one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainSnapshot {
    pub trains: Vec<ResolvedTrain>,

    /// When the batch was applied; `None` before the first refresh
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Marker style for a station on the train map.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker<'a> {
    pub station: &'a Station,
    pub fill_color: &'static str,
    pub radius: u8,
    pub highlighted: bool,
}

/// A train placed at its resolved station.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainMarker<'a> {
    pub train: &'a TrainRecord,
    pub station: &'a Station,
    pub location: GeoPoint,
}

/// Session-scoped dashboard state.
#[derive(Debug)]
pub struct DashboardSession {
    registry: Arc<StationRegistry>,
    filter: FilterState,
    snapshot: TrainSnapshot,
}

impl DashboardSession {
    /// Start a session with no trains and no filter.
    pub fn new(registry: Arc<StationRegistry>) -> Self {
        Self {
            registry,
            filter: FilterState::default(),
            snapshot: TrainSnapshot::default(),
        }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// Replace the current trains with a new batch.
    ///
    /// Every record is resolved before the snapshot is swapped, so readers
    /// never see a half-applied cycle. The filter is left alone.
    pub fn apply_batch(&mut self, records: Vec<TrainRecord>, fetched_at: DateTime<Utc>) {
        let trains: Vec<ResolvedTrain> = records
            .into_iter()
            .map(|record| {
                let station = self
                    .registry
                    .resolve(&record.station)
                    .map(|s| s.name.clone());
                if station.is_none() {
                    tracing::debug!(
                        train = %record.train_id,
                        station = %record.station,
                        "station text did not match any station"
                    );
                }
                ResolvedTrain { record, station }
            })
            .collect();

        self.snapshot = TrainSnapshot {
            trains,
            fetched_at: Some(fetched_at),
        };
    }

    pub fn snapshot(&self) -> &TrainSnapshot {
        &self.snapshot
    }

    /// Every record in the current snapshot, ignoring the filter.
    pub fn records(&self) -> impl Iterator<Item = &TrainRecord> + Clone + '_ {
        self.snapshot.trains.iter().map(|t| &t.record)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Filter the train list on a station.
    ///
    /// Unknown names return `NotFound` and leave the filter unchanged.
    pub fn select_station(&mut self, name: &str) -> Result<&Station, RegistryError> {
        let station = self.registry.lookup(name)?;
        self.filter.select(station.name.clone());
        Ok(station)
    }

    /// Show all trains again.
    pub fn reset_filter(&mut self) {
        self.filter.reset();
    }

    /// Trains that pass the current filter, in feed order.
    pub fn visible_train_records(&self) -> Vec<&ResolvedTrain> {
        self.snapshot
            .trains
            .iter()
            .filter(|t| self.filter.admits(&self.registry, &t.record.station))
            .collect()
    }

    /// The selected station, if the list is filtered.
    pub fn highlighted_station(&self) -> Option<&Station> {
        self.filter
            .target()
            .and_then(|name| self.registry.get(name.as_str()))
    }

    /// Polylines for every line.
    pub fn route_polylines(&self) -> BTreeMap<Line, Vec<GeoPoint>> {
        route_polylines(&self.registry)
    }

    /// Map markers for every train whose station resolved.
    pub fn train_markers(&self) -> Vec<TrainMarker<'_>> {
        self.snapshot
            .trains
            .iter()
            .filter_map(|t| {
                let station = self.registry.get(t.station.as_ref()?.as_str())?;
                Some(TrainMarker {
                    train: &t.record,
                    station,
                    location: station.location,
                })
            })
            .collect()
    }

    /// Marker style for every station.
    ///
    /// The selected station is highlighted. Other stations take the colour
    /// of the first train at them, or stay white.
    pub fn station_markers(&self) -> Vec<StationMarker<'_>> {
        let highlighted = self.filter.target();

        self.registry
            .stations()
            .iter()
            .map(|station| {
                if highlighted == Some(&station.name) {
                    return StationMarker {
                        station,
                        fill_color: HIGHLIGHT_COLOR,
                        radius: HIGHLIGHT_RADIUS,
                        highlighted: true,
                    };
                }

                let fill_color = self
                    .snapshot
                    .trains
                    .iter()
                    .find(|t| t.station.as_ref() == Some(&station.name))
                    .map(|t| t.record.line.color())
                    .unwrap_or(IDLE_COLOR);

                StationMarker {
                    station,
                    fill_color,
                    radius: STATION_RADIUS,
                    highlighted: false,
                }
            })
            .collect()
    }
}
