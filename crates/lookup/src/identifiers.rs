//! Country identifiers.
//!
//! Ids are the join key between geometry, display names and index entries.
//! They wrap `Arc<str>` so every ring in the index can carry its owner for the
//! price of a pointer copy.

use std::fmt;
use std::sync::Arc;

/// Stable id of a country within one loaded dataset: the feature's own id,
/// or `feature-<index>` when it has none.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryId(Arc<str>);

impl CountryId {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().into())
    }

    /// Id synthesised for a feature that carries none of its own.
    pub fn for_feature_index(index: usize) -> Self {
        Self::new(format!("feature-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CountryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CountryId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for CountryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = CountryId::new("250");
        let id2 = CountryId::new("250");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(CountryId::new("FRA"), 42);

        assert_eq!(map.get(&CountryId::new("FRA")), Some(&42));
    }

    #[test]
    fn test_identifier_conversions() {
        assert_eq!(CountryId::from("FRA"), CountryId::from(String::from("FRA")));
        assert_eq!(CountryId::new("FRA").as_ref(), "FRA");
    }

    #[test]
    fn test_identifier_display() {
        let id = CountryId::new("076");
        assert_eq!(format!("{}", id), "076");
    }

    #[test]
    fn test_feature_index_id() {
        assert_eq!(CountryId::for_feature_index(7).as_str(), "feature-7");
    }

    #[test]
    fn test_identifier_ordering() {
        let mut ids = vec![CountryId::new("b"), CountryId::new("a"), CountryId::new("c")];
        ids.sort();
        let names: Vec<_> = ids.iter().map(CountryId::as_str).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
