//! Selected-station filter.

use crate::domain::StationName;
use crate::network::StationRegistry;

/// Which trains the dashboard lists.
///
/// Starts `Unfiltered`. Selecting a station replaces any previous
/// selection; nothing clears it except an explicit reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    /// Every train is listed
    #[default]
    Unfiltered,

    /// Only trains whose next station matches this one are listed
    FilteredBy(StationName),
}

impl FilterState {
    /// Filter on a station, replacing any current selection.
    pub fn select(&mut self, station: StationName) {
        *self = FilterState::FilteredBy(station);
    }

    /// Clear the filter.
    pub fn reset(&mut self) {
        *self = FilterState::Unfiltered;
    }

    /// The selected station, if any.
    pub fn target(&self) -> Option<&StationName> {
        match self {
            FilterState::Unfiltered => None,
            FilterState::FilteredBy(station) => Some(station),
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, FilterState::FilteredBy(_))
    }

    /// Whether a train's raw station text passes the filter.
    pub fn admits(&self, registry: &StationRegistry, raw_station: &str) -> bool {
        match self {
            FilterState::Unfiltered => true,
            FilterState::FilteredBy(target) => registry.matches(raw_station, target.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    #[test]
    fn starts_unfiltered() {
        let filter = FilterState::default();
        assert_eq!(filter, FilterState::Unfiltered);
        assert!(filter.target().is_none());
        assert!(!filter.is_filtered());
    }

    #[test]
    fn select_then_replace_then_reset() {
        let mut filter = FilterState::default();

        filter.select(name("FIVE POINTS"));
        assert_eq!(filter, FilterState::FilteredBy(name("FIVE POINTS")));

        filter.select(name("OMNI"));
        assert_eq!(filter, FilterState::FilteredBy(name("OMNI")));

        filter.reset();
        assert_eq!(filter, FilterState::Unfiltered);
    }

    #[test]
    fn reset_when_unfiltered_is_noop() {
        let mut filter = FilterState::default();
        filter.reset();
        assert_eq!(filter, FilterState::Unfiltered);
    }

    #[test]
    fn admits() {
        let registry = StationRegistry::marta().unwrap();
        let mut filter = FilterState::default();
        assert!(filter.admits(&registry, "ANYWHERE"));

        filter.select(name("OMNI"));
        assert!(filter.admits(&registry, "OMNI STATION"));
        assert!(filter.admits(&registry, "CNN Center"));
        assert!(!filter.admits(&registry, "FIVE POINTS"));
        assert!(!filter.admits(&registry, ""));
    }
}
