//! Proposed patch carried by a change request.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A proposed patch with an explicit set of touched keys.
///
/// Values and intent are tracked separately: a key is touched when the
/// proposer meant to change it, regardless of how falsy the new value looks.
/// Patches parsed from JSON mark every key that is present with a non-null
/// value as touched; `0`, `false` and `""` all count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    values: Map<String, Value>,
    touched: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a change set from a raw patch payload.
    ///
    /// Anything other than a JSON object yields an empty change set.
    pub fn from_patch(patch: Value) -> Self {
        let Value::Object(values) = patch else {
            return Self::default();
        };

        let touched = values
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.clone())
            .collect();

        Self { values, touched }
    }

    /// Sets a value and marks the key touched.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        let key = key.into();
        self.touched.insert(key.clone());
        self.values.insert(key, value);
        self
    }

    /// Builder form of [`ChangeSet::set`].
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Keeps the value but stops treating the key as an intended change.
    pub fn untouch(&mut self, key: &str) -> &mut Self {
        self.touched.remove(key);
        self
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    /// The proposed value for a touched key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if self.is_touched(key) {
            self.values.get(key)
        } else {
            None
        }
    }

    pub fn touched_keys(&self) -> impl Iterator<Item = &str> {
        self.touched.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.touched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// The touched values as a JSON object.
    pub fn to_value(&self) -> Value {
        let map = self
            .values
            .iter()
            .filter(|(key, _)| self.touched.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for ChangeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChangeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_patch(Value::deserialize(deserializer)?))
    }
}
