//! Dynamic row items and their keys

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::DataError;

/// A dynamic row item.
///
/// Items hold field values as a `BTreeMap<String, Value>`. The table engine
/// never interprets their shape beyond the track field named by the config
/// and the field each column reads.
///
/// # Example
///
/// ```
/// use dyntable_lib::model::Item;
///
/// let item = Item::new()
///     .set("id", "1")
///     .set("animal", "cat")
///     .set("domestic", true);
///
/// assert_eq!(item.get_str("animal"), Some("cat"));
/// assert_eq!(item.key("id").unwrap().as_str(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: BTreeMap<String, Value>,
}

impl Item {
    /// Creates a new empty item.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or `Null` when the field is absent.
    pub fn value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Returns the field as a string slice if it holds a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns `true` if the item contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns the row key stored under `track_id`.
    ///
    /// A missing field and a `Null` value both count as no key.
    pub fn key(&self, track_id: &str) -> Option<RowKey> {
        match self.fields.get(track_id) {
            None | Some(Value::Null) => None,
            Some(value) => Some(RowKey(value.to_string())),
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl From<serde_json::Value> for Item {
    /// Builds an item from a JSON object. Non-object values yield an empty item.
    fn from(v: serde_json::Value) -> Self {
        match Value::from(v) {
            Value::Map(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// RowKey
// =============================================================================

/// Stable identity of a row: the display form of its track field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a key from its string form.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

// =============================================================================
// ItemSet
// =============================================================================

/// An item collection whose keys have been checked.
///
/// Every item has a non-null track value and no two items share one.
/// Order is preserved exactly as supplied.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    entries: Vec<(RowKey, Item)>,
    /// Position of each key in `entries`.
    index: HashMap<RowKey, usize>,
}

impl ItemSet {
    /// Keys `items` by their `track_id` field.
    ///
    /// The collection is rejected as a whole on the first item without a
    /// key or the first repeated key.
    pub fn new(items: Vec<Item>, track_id: &str) -> Result<Self, DataError> {
        let mut index: HashMap<RowKey, usize> = HashMap::with_capacity(items.len());
        let mut entries = Vec::with_capacity(items.len());

        for (position, item) in items.into_iter().enumerate() {
            let key = item
                .key(track_id)
                .ok_or_else(|| DataError::missing_key(position, track_id))?;
            if let Some(&first) = index.get(&key) {
                return Err(DataError::DuplicateKey {
                    track_id: track_id.to_string(),
                    key: key.to_string(),
                    first,
                    second: position,
                });
            }
            index.insert(key.clone(), position);
            entries.push((key, item));
        }

        Ok(Self { entries, index })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, item)` pairs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &Item)> {
        self.entries.iter().map(|(k, item)| (k, item))
    }

    /// Iterates over the keys in collection order.
    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Looks up an item by key.
    pub fn get(&self, key: &RowKey) -> Option<&Item> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, item)| item)
    }

    /// Returns `true` if an item with the given key exists.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.index.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(id: &str, name: &str) -> Item {
        Item::new().set("id", id).set("animal", name)
    }

    #[test]
    fn test_lookup_by_key() {
        let items =
            ItemSet::new(vec![animal("b", "snake"), animal("a", "cat")], "id").unwrap();

        assert_eq!(items.get(&RowKey::from("a")).unwrap().get_str("animal"), Some("cat"));
        assert_eq!(items.get(&RowKey::from("b")).unwrap().get_str("animal"), Some("snake"));
        assert!(items.get(&RowKey::from("c")).is_none());
        assert!(items.contains(&RowKey::from("b")));
        assert!(!items.contains(&RowKey::from("c")));

        let keys: Vec<&str> = items.keys().map(RowKey::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_set_has_no_keys() {
        let items = ItemSet::default();
        assert!(items.is_empty());
        assert!(!items.contains(&RowKey::from("a")));
    }
}
