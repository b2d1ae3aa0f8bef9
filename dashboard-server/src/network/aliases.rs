//! Matching free-form feed text against canonical station names.
//!
//! Feeds report stations in many spellings: "FIVE POINTS STATION",
//! "Lindbergh Station", "HARTSFIELD-JACKSON". The matching rules here are
//! deliberately loose substring checks so that existing feed text keeps
//! matching; disambiguation between several matching stations is handled
//! by [`StationRegistry::resolve`](super::StationRegistry::resolve).

use std::collections::HashMap;

use crate::domain::{StationName, normalize};

/// Suffix stripped from canonical names before the second substring check.
const STATION_SUFFIX: &str = " STATION";

/// Alternative spellings for canonical stations.
///
/// Aliases are stored upper-case and trimmed. Blank aliases are ignored,
/// since an empty alias would match every piece of text.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<StationName, Vec<String>>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias for a station.
    pub fn insert(&mut self, station: StationName, alias: &str) {
        let alias = normalize(alias);
        if alias.is_empty() {
            return;
        }
        let aliases = self.entries.entry(station).or_default();
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    /// Aliases registered for a canonical name (empty if none).
    pub fn aliases_for(&self, station: &str) -> &[String] {
        self.entries
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over `(station, aliases)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationName, &[String])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of stations with at least one alias.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `raw` refers to the station `canonical`.
    ///
    /// Both strings are trimmed and upper-cased. A match is any of, in order:
    /// the raw text contains the canonical name; it contains the canonical
    /// name with a trailing " STATION" removed; it contains one of the
    /// station's aliases. Blank input never matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_server::domain::StationName;
    /// use dashboard_server::network::AliasTable;
    ///
    /// let mut aliases = AliasTable::new();
    /// aliases.insert(StationName::parse("OMNI").unwrap(), "CNN CENTER");
    ///
    /// assert!(aliases.matches("Omni Station", "OMNI"));
    /// assert!(aliases.matches("CNN Center", "omni"));
    /// assert!(!aliases.matches("Five Points", "OMNI"));
    /// assert!(!aliases.matches("", "OMNI"));
    /// ```
    pub fn matches(&self, raw: &str, canonical: &str) -> bool {
        let raw = normalize(raw);
        let canonical = normalize(canonical);

        if raw.is_empty() || canonical.is_empty() {
            return false;
        }

        if raw.contains(&canonical) {
            return true;
        }

        if let Some(stripped) = canonical.strip_suffix(STATION_SUFFIX)
            && raw.contains(stripped)
        {
            return true;
        }

        self.aliases_for(&canonical)
            .iter()
            .any(|alias| raw.contains(alias.as_str()))
    }

    /// Length of the longest term (name, stripped name or alias) of
    /// `canonical` that occurs in `raw`, or `None` if nothing matches.
    ///
    /// Both arguments must already be normalized.
    pub(crate) fn match_strength(&self, raw: &str, canonical: &str) -> Option<usize> {
        if raw.is_empty() || canonical.is_empty() {
            return None;
        }

        let stripped = canonical.strip_suffix(STATION_SUFFIX);

        std::iter::once(canonical)
            .chain(stripped)
            .chain(self.aliases_for(canonical).iter().map(String::as_str))
            .filter(|term| !term.is_empty() && raw.contains(term))
            .map(str::len)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn table() -> AliasTable {
        let mut t = AliasTable::new();
        t.insert(name("AIRPORT"), "Hartsfield-Jackson");
        t.insert(name("AIRPORT"), "ATL AIRPORT");
        t.insert(name("OMNI"), "CNN CENTER");
        t.insert(name("OMNI"), "STATE FARM ARENA");
        t
    }

    #[test]
    fn direct_substring() {
        let t = table();
        assert!(t.matches("FIVE POINTS", "FIVE POINTS"));
        assert!(t.matches("FIVE POINTS STATION", "FIVE POINTS"));
        assert!(t.matches("  five points station ", "Five Points"));
    }

    #[test]
    fn station_suffix_stripped_from_canonical() {
        let t = table();
        assert!(t.matches("LINDBERGH CENTER", "LINDBERGH CENTER STATION"));
        assert!(!t.matches("LINDBERGH", "LINDBERGH CENTER STATION"));
    }

    #[test]
    fn aliases_are_upper_cased() {
        let t = table();
        assert_eq!(
            t.aliases_for("AIRPORT"),
            &["HARTSFIELD-JACKSON".to_string(), "ATL AIRPORT".to_string()]
        );
        assert!(t.matches("hartsfield-jackson intl", "AIRPORT"));
        assert!(t.matches("State Farm Arena", "OMNI"));
    }

    #[test]
    fn alias_lookup_uses_normalized_canonical() {
        let t = table();
        assert!(t.matches("CNN CENTER", " omni "));
    }

    #[test]
    fn blank_inputs_never_match() {
        let t = table();
        assert!(!t.matches("", "OMNI"));
        assert!(!t.matches("OMNI", ""));
        assert!(!t.matches("   ", "OMNI"));
        assert!(!t.matches("OMNI", "  "));
    }

    #[test]
    fn blank_aliases_ignored() {
        let mut t = AliasTable::new();
        t.insert(name("OMNI"), "   ");
        assert!(t.is_empty());
        assert!(!t.matches("ANYTHING", "OMNI"));
    }

    #[test]
    fn duplicate_aliases_collapse() {
        let mut t = AliasTable::new();
        t.insert(name("MIDTOWN"), "midtown station");
        t.insert(name("MIDTOWN"), "MIDTOWN STATION");
        assert_eq!(t.aliases_for("MIDTOWN").len(), 1);
    }

    #[test]
    fn no_match() {
        let t = table();
        assert!(!t.matches("DECATUR", "OMNI"));
        assert!(!t.matches("OMN", "OMNI"));
    }

    #[test]
    fn strength_prefers_longest_term() {
        let t = table();
        assert_eq!(t.match_strength("ATL AIRPORT", "AIRPORT"), Some(11));
        assert_eq!(t.match_strength("AIRPORT", "AIRPORT"), Some(7));
        assert_eq!(t.match_strength("DECATUR", "AIRPORT"), None);
        assert_eq!(t.match_strength("", "AIRPORT"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn station_name() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z]{2,10}( [A-Z]{2,10}){0,2}").unwrap()
    }

    proptest! {
        /// Every name matches itself
        #[test]
        fn self_match(s in station_name()) {
            let t = AliasTable::new();
            prop_assert!(t.matches(&s, &s));
        }

        /// Feed text with a " STATION" suffix matches the bare name
        #[test]
        fn suffixed_match(s in station_name()) {
            let t = AliasTable::new();
            let raw = format!("{s} STATION");
            prop_assert!(t.matches(&raw, &s));
        }

        /// Every registered alias matches its station
        #[test]
        fn alias_match(s in station_name(), alias in station_name()) {
            let mut t = AliasTable::new();
            t.insert(StationName::parse(&s).unwrap(), &alias);
            prop_assert!(t.matches(&alias, &s));
        }

        /// Blank text on either side never matches
        #[test]
        fn empty_never_matches(s in station_name()) {
            let t = AliasTable::new();
            prop_assert!(!t.matches("", &s));
            prop_assert!(!t.matches(&s, ""));
        }

        /// Matching ignores case
        #[test]
        fn case_insensitive(s in station_name()) {
            let t = AliasTable::new();
            prop_assert!(t.matches(&s.to_lowercase(), &s));
            prop_assert!(t.matches(&s, &s.to_lowercase()));
        }

        /// Strength is present exactly when matches is true
        #[test]
        fn strength_agrees_with_matches(raw in station_name(), s in station_name()) {
            let t = AliasTable::new();
            prop_assert_eq!(
                t.matches(&raw, &s),
                t.match_strength(&normalize(&raw), &normalize(&s)).is_some()
            );
        }
    }
}
