//! Abstract hierarchical key/value persistence unit.
//!
//! A [`StorageSet`] is an insertion-ordered mapping from field name to a typed
//! value: string, integer, 64-bit integer, double, boolean, nested set, or an
//! ordered list. Every reader substitutes a documented default when a key is
//! missing or holds a different type; that tolerance is how forward and
//! backward compatibility of auxiliary payloads is achieved.
//!
//! Sets are plain serde values, so the sled glue can carry them as bincode and
//! seed files can carry them as JSON without this module knowing either format.

pub mod store;

use serde::{Deserialize, Serialize};

/// A single typed field value inside a [`StorageSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageValue {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Set(StorageSet),
    List(Vec<StorageValue>),
}

static EMPTY_SET: StorageSet = StorageSet { fields: Vec::new() };
static EMPTY_LIST: &[StorageValue] = &[];

/// Insertion-ordered field mapping. Storing under an existing name replaces
/// the old value in place, so repeated saves of an unchanged owner produce
/// byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSet {
    fields: Vec<(String, StorageValue)>,
}

impl StorageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with no fields. By convention an empty set means "ephemeral,
    /// do not persist" when returned from an auxiliary store operation.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StorageValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn put(&mut self, key: &str, value: StorageValue) {
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| name == key) {
            slot.1 = value;
        } else {
            self.fields.push((key.to_string(), value));
        }
    }

    fn get(&self, key: &str) -> Option<&StorageValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn store_string(&mut self, key: &str, value: &str) {
        self.put(key, StorageValue::String(value.to_string()));
    }

    pub fn store_int(&mut self, key: &str, value: i32) {
        self.put(key, StorageValue::Int(value));
    }

    pub fn store_long(&mut self, key: &str, value: i64) {
        self.put(key, StorageValue::Long(value));
    }

    pub fn store_double(&mut self, key: &str, value: f64) {
        self.put(key, StorageValue::Double(value));
    }

    pub fn store_bool(&mut self, key: &str, value: bool) {
        self.put(key, StorageValue::Bool(value));
    }

    pub fn store_set(&mut self, key: &str, value: StorageSet) {
        self.put(key, StorageValue::Set(value));
    }

    pub fn store_list(&mut self, key: &str, value: Vec<StorageValue>) {
        self.put(key, StorageValue::List(value));
    }

    /// Convenience for the common list-of-strings case.
    pub fn store_string_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) {
        self.put(
            key,
            StorageValue::List(
                values
                    .iter()
                    .map(|s| StorageValue::String(s.as_ref().to_string()))
                    .collect(),
            ),
        );
    }

    /// Missing or non-string key reads as "".
    pub fn read_string(&self, key: &str) -> &str {
        match self.get(key) {
            Some(StorageValue::String(s)) => s,
            _ => "",
        }
    }

    /// Missing or non-integer key reads as 0. A stored long in i32 range is
    /// accepted so payloads widened by a later version still load.
    pub fn read_int(&self, key: &str) -> i32 {
        match self.get(key) {
            Some(StorageValue::Int(v)) => *v,
            Some(StorageValue::Long(v)) => i32::try_from(*v).unwrap_or(0),
            _ => 0,
        }
    }

    /// Missing key reads as 0; plain ints widen.
    pub fn read_long(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(StorageValue::Long(v)) => *v,
            Some(StorageValue::Int(v)) => i64::from(*v),
            _ => 0,
        }
    }

    /// Missing key reads as 0.0; integer values widen.
    pub fn read_double(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(StorageValue::Double(v)) => *v,
            Some(StorageValue::Int(v)) => f64::from(*v),
            Some(StorageValue::Long(v)) => *v as f64,
            _ => 0.0,
        }
    }

    /// Missing key reads as false.
    pub fn read_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(StorageValue::Bool(true)))
    }

    /// Missing key reads as the empty set.
    pub fn read_set(&self, key: &str) -> &StorageSet {
        match self.get(key) {
            Some(StorageValue::Set(set)) => set,
            _ => &EMPTY_SET,
        }
    }

    /// Missing key reads as the empty list.
    pub fn read_list(&self, key: &str) -> &[StorageValue] {
        match self.get(key) {
            Some(StorageValue::List(items)) => items,
            _ => EMPTY_LIST,
        }
    }

    /// String items of a stored list; non-string items are skipped.
    pub fn read_string_list(&self, key: &str) -> Vec<String> {
        self.read_list(key)
            .iter()
            .filter_map(|v| match v {
                StorageValue::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}
