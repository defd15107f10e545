//! Location filter applied to candidate elements.

/// Predicate that accepts an element only when its content mentions at
/// least one configured location name.
///
/// Matching is case- and diacritic-sensitive substring search over the raw
/// serialized element (tag text plus nested markup), not a parsed address
/// field. Source pages mix listings from many areas; only elements naming
/// one of the configured locations survive. An empty name set rejects
/// everything.
#[derive(Debug, Clone, Default)]
pub struct CityFilter {
    cities: Vec<String>,
}

impl CityFilter {
    /// Create a filter from a set of location names.
    pub fn new(cities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            cities: cities.into_iter().map(|c| c.into()).collect(),
        }
    }

    /// Check whether `text` mentions any configured location.
    pub fn accepts(&self, text: &str) -> bool {
        self.cities.iter().any(|city| text.contains(city.as_str()))
    }

    /// The configured location names.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Whether no locations are configured (such a filter rejects all).
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
