use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immutable-by-convention snapshot of the current field values, keyed by field id.
///
/// Every value is a string: choice fields carry the selected option value and a
/// checked checkbox carries its option value (several checked options are joined
/// with `,`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Returns the value only when it holds something other than whitespace.
    pub fn filled(&self, id: &str) -> Option<&str> {
        self.get(id).filter(|value| !value.trim().is_empty())
    }

    pub fn is_filled(&self, id: &str) -> bool {
        self.filled(id).is_some()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(id.into(), value.into())
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for FormValues {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:?}", key, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_ignores_blank_values() {
        let values = FormValues::from_iter([("contactMe", "  "), ("rating", "4")]);
        assert!(values.contains("contactMe"));
        assert!(!values.is_filled("contactMe"));
        assert_eq!(values.filled("rating"), Some("4"));
    }

    #[test]
    fn display_lists_entries_in_key_order() {
        let values = FormValues::from_iter([("rating", "5"), ("email", "a@b.io")]);
        assert_eq!(values.to_string(), r#"{email: "a@b.io", rating: "5"}"#);
    }

    #[test]
    fn deserializes_from_flat_object() {
        let values: FormValues =
            serde_json::from_str(r#"{"rating":"3","contactMe":"yes"}"#).expect("values");
        assert_eq!(values.get("rating"), Some("3"));
        assert_eq!(values.len(), 2);
    }
}
