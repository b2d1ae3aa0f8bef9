//! The rail network model.
//!
//! A static catalog of stations and line sequences, plus the rules for
//! matching the free-form station text found in live feeds against it.

mod aliases;
mod marta;
mod polyline;
mod registry;

pub use aliases::AliasTable;
pub use polyline::{polyline_for, route_polylines};
pub use registry::{RegistryBuilder, RegistryError, StationRegistry};
