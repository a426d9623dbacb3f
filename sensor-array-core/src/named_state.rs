// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Keyed state contributed by sensors and assembled into snapshots.
//!
//! A [`NamedState`] maps sensor-defined keys to JSON values and remembers insertion
//! order, so "the first field" of a sensor's contribution is well defined. Timestamps
//! are stored under [`TIMESTAMP_KEY`] as milliseconds since the Unix epoch:
//!
//! - on the first top-level field of each contribution, the sample's capture time;
//! - at the top level of a snapshot, the time the snapshot was assembled.
//!
//! # Example
//!
//! ```
//! use sensor_array_core::NamedState;
//! use serde_json::json;
//!
//! let mut state = NamedState::new();
//! state.insert("battery", json!({ "level": 0.8 }));
//!
//! let mut update = NamedState::new();
//! update.insert("battery", json!({ "level": 0.7 }));
//! update.insert("network", json!({ "online": true }));
//!
//! state.merge(update);
//! assert_eq!(state.len(), 2);
//! assert_eq!(state.get("battery").unwrap()["level"], 0.7);
//! ```

use crate::sample::Timestamp;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key under which timestamps are recorded.
pub const TIMESTAMP_KEY: &str = "$timestamp";

/// An insertion-ordered mapping from sensor-defined keys to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedState(Map<String, Value>);

impl NamedState {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, convenient when writing `extract_state`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a field, returning the previous value.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The key inserted first, if any.
    pub fn first_key(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    /// Folds `other` into `self`, key by key. Keys present in both take `other`'s value.
    pub fn merge(&mut self, other: NamedState) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Records `captured_at` on the first top-level field.
    ///
    /// Only object values can carry a timestamp. Returns `false` when the state is
    /// empty or its first field is not an object, in which case nothing changes.
    pub fn stamp_first_field(&mut self, captured_at: Timestamp) -> bool {
        match self.0.values_mut().next() {
            Some(Value::Object(fields)) => {
                fields.insert(TIMESTAMP_KEY.to_string(), encode(captured_at));
                true
            }
            _ => false,
        }
    }

    /// Sets the top-level timestamp.
    pub fn set_timestamp(&mut self, at: Timestamp) {
        self.0.insert(TIMESTAMP_KEY.to_string(), encode(at));
    }

    /// The top-level timestamp, if one was set.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.0.get(TIMESTAMP_KEY).and_then(decode)
    }

    /// The timestamp recorded on a top-level field, if any.
    pub fn field_timestamp(&self, key: &str) -> Option<Timestamp> {
        self.0
            .get(key)
            .and_then(|value| value.get(TIMESTAMP_KEY))
            .and_then(decode)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn encode(at: Timestamp) -> Value {
    Value::from(at.timestamp_millis())
}

fn decode(value: &Value) -> Option<Timestamp> {
    value.as_i64().and_then(DateTime::from_timestamp_millis)
}

impl From<Map<String, Value>> for NamedState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<NamedState> for Value {
    fn from(state: NamedState) -> Self {
        Value::Object(state.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for NamedState {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for NamedState {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
