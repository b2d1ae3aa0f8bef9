//! Station registry and line catalog.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    DisplayPosition, GeoPoint, InvalidStationName, Line, Station, StationName, normalize,
};

use super::aliases::AliasTable;

/// Errors from building or querying the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Station name absent from the registry
    #[error("station not found: {0}")]
    NotFound(String),

    /// A station or line entry used a blank name
    #[error(transparent)]
    InvalidName(#[from] InvalidStationName),

    /// The same station was registered twice
    #[error("station {0} registered twice")]
    DuplicateStation(StationName),

    /// A station was registered without any lines
    #[error("station {0} has no line memberships")]
    NoLines(StationName),

    /// A station claims a line whose sequence does not list it
    #[error("station {station} claims the {line} line, which does not list it")]
    NotOnLine { station: StationName, line: Line },

    /// A line lists a registered station that does not claim the line
    #[error("{line} line lists station {station}, which does not claim it")]
    MissingMembership { station: StationName, line: Line },

    /// An alias was registered for a station that does not exist
    #[error("alias target {0} is not a registered station")]
    UnknownAliasTarget(StationName),

    /// Two stations share an identical alias
    #[error("alias {alias:?} registered for both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: StationName,
        second: StationName,
    },
}

/// The static catalog of stations, line sequences and aliases.
///
/// Built once through [`RegistryBuilder`], which checks that stations and
/// line sequences agree. There is no mutation API afterwards; share it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    /// Stations in registration order (this order breaks resolution ties)
    stations: Vec<Station>,

    /// Canonical name → index into `stations`
    index: HashMap<StationName, usize>,

    /// Ordered station sequence per line
    lines: BTreeMap<Line, Vec<StationName>>,

    aliases: AliasTable,
}

impl StationRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a station by name. The name is normalized first.
    pub fn lookup(&self, name: &str) -> Result<&Station, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.trim().to_string()))
    }

    /// Look up a station by name, returning `None` if absent.
    pub fn get(&self, name: &str) -> Option<&Station> {
        let key = normalize(name);
        self.index.get(key.as_str()).map(|&i| &self.stations[i])
    }

    /// All stations in registration order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// The catalog's station sequence for a line, including any names that
    /// are not registered.
    pub fn line_sequence(&self, line: Line) -> &[StationName] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or_default()
    }

    /// Registered stations on a line, in route order.
    pub fn stations_for_line(&self, line: Line) -> Vec<&Station> {
        self.line_sequence(line)
            .iter()
            .filter_map(|name| self.get(name.as_str()))
            .collect()
    }

    /// Lines calling at a station.
    pub fn lines_through(&self, name: &str) -> Result<&[Line], RegistryError> {
        self.lookup(name).map(|s| s.lines.as_slice())
    }

    /// The alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Whether raw feed text refers to the given canonical station.
    ///
    /// See [`AliasTable::matches`] for the rules.
    pub fn matches(&self, raw: &str, canonical: &str) -> bool {
        self.aliases.matches(raw, canonical)
    }

    /// Resolve raw feed text to a single station.
    ///
    /// When several stations match, the one whose matching term (name,
    /// name without " STATION", or alias) is longest wins; ties go to the
    /// station registered first.
    pub fn resolve(&self, raw: &str) -> Option<&Station> {
        let raw = normalize(raw);
        let mut best: Option<(&Station, usize)> = None;

        for station in &self.stations {
            let Some(strength) = self.aliases.match_strength(&raw, station.name.as_str()) else {
                continue;
            };
            if best.is_none_or(|(_, current)| strength > current) {
                best = Some((station, strength));
            }
        }

        best.map(|(station, _)| station)
    }

    /// Every station the raw text matches, in registration order.
    pub fn resolve_all(&self, raw: &str) -> Vec<&Station> {
        let raw = normalize(raw);
        self.stations
            .iter()
            .filter(|s| self.aliases.match_strength(&raw, s.name.as_str()).is_some())
            .collect()
    }

    /// Number of registered stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

struct PendingStation {
    name: String,
    location: GeoPoint,
    display: Option<DisplayPosition>,
    lines: Vec<Line>,
}

/// Builder for [`StationRegistry`].
///
/// Names are accepted as plain strings and validated in [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    stations: Vec<PendingStation>,
    lines: Vec<(Line, Vec<String>)>,
    aliases: Vec<(String, Vec<String>)>,
}

impl RegistryBuilder {
    /// Register a station.
    pub fn station(
        mut self,
        name: &str,
        location: GeoPoint,
        display: Option<DisplayPosition>,
        lines: &[Line],
    ) -> Self {
        self.stations.push(PendingStation {
            name: name.to_string(),
            location,
            display,
            lines: lines.to_vec(),
        });
        self
    }

    /// Set the ordered station sequence of a line. A later call for the
    /// same line replaces the earlier one.
    pub fn line(mut self, line: Line, stations: &[&str]) -> Self {
        self.lines.retain(|(l, _)| *l != line);
        self.lines
            .push((line, stations.iter().map(|s| s.to_string()).collect()));
        self
    }

    /// Register aliases for a station.
    pub fn aliases(mut self, station: &str, aliases: &[&str]) -> Self {
        self.aliases.push((
            station.to_string(),
            aliases.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Validate and build the registry.
    pub fn build(self) -> Result<StationRegistry, RegistryError> {
        let mut stations = Vec::with_capacity(self.stations.len());
        let mut index = HashMap::with_capacity(self.stations.len());

        for pending in self.stations {
            let name = StationName::parse(&pending.name)?;
            if index.contains_key(&name) {
                return Err(RegistryError::DuplicateStation(name));
            }

            let mut lines = Vec::with_capacity(pending.lines.len());
            for line in pending.lines {
                if !lines.contains(&line) {
                    lines.push(line);
                }
            }
            if lines.is_empty() {
                return Err(RegistryError::NoLines(name));
            }

            index.insert(name.clone(), stations.len());
            stations.push(Station {
                name,
                location: pending.location,
                display: pending.display,
                lines,
            });
        }

        let mut lines = BTreeMap::new();
        for (line, names) in self.lines {
            let names = names
                .iter()
                .map(|n| StationName::parse(n))
                .collect::<Result<Vec<_>, _>>()?;
            lines.insert(line, names);
        }

        // Every line a station claims must list it...
        for station in &stations {
            for &line in &station.lines {
                let listed = lines
                    .get(&line)
                    .is_some_and(|seq: &Vec<StationName>| seq.contains(&station.name));
                if !listed {
                    return Err(RegistryError::NotOnLine {
                        station: station.name.clone(),
                        line,
                    });
                }
            }
        }

        // ...and every registered station a line lists must claim it.
        for (&line, sequence) in &lines {
            for name in sequence {
                match index.get(name) {
                    Some(&i) if !stations[i].serves(line) => {
                        return Err(RegistryError::MissingMembership {
                            station: name.clone(),
                            line,
                        });
                    }
                    Some(_) => {}
                    None => {
                        tracing::debug!(%line, station = %name, "line lists unregistered station");
                    }
                }
            }
        }

        let mut aliases = AliasTable::new();
        let mut owners: HashMap<String, StationName> = HashMap::new();
        for (target, list) in self.aliases {
            let target = StationName::parse(&target)?;
            if !index.contains_key(&target) {
                return Err(RegistryError::UnknownAliasTarget(target));
            }
            for alias in list {
                let normalized = normalize(&alias);
                if normalized.is_empty() {
                    continue;
                }
                if let Some(owner) = owners.get(&normalized)
                    && *owner != target
                {
                    return Err(RegistryError::DuplicateAlias {
                        alias: normalized,
                        first: owner.clone(),
                        second: target,
                    });
                }
                owners.insert(normalized, target.clone());
                aliases.insert(target.clone(), &alias);
            }
        }

        Ok(StationRegistry {
            stations,
            index,
            lines,
            aliases,
        })
    }
}
