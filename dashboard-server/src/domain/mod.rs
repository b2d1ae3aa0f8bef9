//! Domain types for the rail dashboard.
//!
//! Types here enforce their invariants at construction time: a
//! `StationName` is always normalized, a `Line` is always one of the
//! MARTA rail lines, and a `TrainRecord` always has an id, line and
//! station.

mod line;
mod station;
mod train;

pub use line::{InvalidLine, Line};
pub use station::{DisplayPosition, GeoPoint, InvalidStationName, Station, StationName, normalize};
pub use train::{RawTrainRecord, RecordError, TrainRecord, parse_delay};
