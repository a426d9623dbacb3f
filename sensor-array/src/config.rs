// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Array configuration.
//!
//! The recognised options form a closed set:
//!
//! | key          | effect                                            | default |
//! |--------------|---------------------------------------------------|---------|
//! | `delay`      | pause between cycles, see [`Delay`]               | `0`     |
//! | `accumulate` | fold every cycle into one cumulative state        | `false` |
//! | `timestamp`  | stamp contributions and snapshots with `$timestamp` | `true`  |
//!
//! Any other key fails with [`SensorArrayError::Configuration`]. `accumulate` and
//! `timestamp` accept any JSON value and are coerced by truthiness: `null`, `false`, `0`
//! and `""` are false, everything else is true.
//!
//! ```
//! use sensor_array::{ArrayConfig, Delay};
//!
//! let config = ArrayConfig::from_json_str(r#"{ "delay": "requestAnimationFrame", "accumulate": 1 }"#)?;
//! assert_eq!(config.delay, Delay::FrameSync);
//! assert!(config.accumulate);
//! assert!(config.timestamp);
//!
//! let err = ArrayConfig::from_json_str(r#"{ "interval": 10 }"#).unwrap_err();
//! assert_eq!(err.to_string(), "Unknown option: interval = 10");
//! # Ok::<(), sensor_array::SensorArrayError>(())
//! ```

use crate::delay::Delay;
use sensor_array_error::{Result, ResultExt, SensorArrayError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resolved configuration of a sensor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ArrayConfig {
    pub delay: Delay,
    pub accumulate: bool,
    pub timestamp: bool,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            delay: Delay::default(),
            accumulate: false,
            timestamp: true,
        }
    }
}

impl ArrayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delay(mut self, delay: impl Into<Delay>) -> Self {
        self.delay = delay.into();
        self
    }

    #[must_use]
    pub fn with_accumulate(mut self, accumulate: bool) -> Self {
        self.accumulate = accumulate;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builds a configuration from `(key, value)` pairs.
    ///
    /// Options are applied in order, so a later duplicate key wins.
    ///
    /// # Errors
    /// - [`SensorArrayError::Configuration`] for a key outside the recognised set.
    /// - [`SensorArrayError::Validation`] for an unacceptable `delay`.
    pub fn from_options<I, K>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            match key.as_ref() {
                "delay" => config.delay = Delay::try_from(&value)?,
                "accumulate" => config.accumulate = is_truthy(&value),
                "timestamp" => config.timestamp = is_truthy(&value),
                other => return Err(SensorArrayError::configuration(other, value)),
            }
        }
        Ok(config)
    }

    /// Builds a configuration from a JSON object. `null` yields the defaults.
    ///
    /// # Errors
    /// As [`ArrayConfig::from_options`], plus [`SensorArrayError::Parse`] when `value`
    /// is neither an object nor `null`.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(options) => {
                Self::from_options(options.iter().map(|(k, v)| (k.as_str(), v.clone())))
            }
            other => Err(SensorArrayError::parse(format!(
                "configuration: expected an object, found {other}"
            ))),
        }
    }

    /// Parses a JSON document and builds a configuration from it.
    ///
    /// # Errors
    /// [`SensorArrayError::Parse`] for malformed JSON, otherwise as [`ArrayConfig::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("JSON configuration")?;
        Self::from_json(&value)
    }

    /// Parses a TOML document whose top-level keys are the array options.
    ///
    /// ```
    /// use sensor_array::{ArrayConfig, Delay};
    ///
    /// let config = ArrayConfig::from_toml_str("delay = 16\ntimestamp = false")?;
    /// assert_eq!(config.delay, Delay::Millis(16));
    /// assert!(!config.timestamp);
    /// # Ok::<(), sensor_array::SensorArrayError>(())
    /// ```
    ///
    /// # Errors
    /// [`SensorArrayError::Parse`] for malformed TOML, otherwise as [`ArrayConfig::from_json`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text).context("TOML configuration")?;
        let value = serde_json::to_value(table).context("TOML configuration")?;
        Self::from_json(&value)
    }

    /// The configuration as a JSON object, in the shape accepted by [`ArrayConfig::from_json`].
    pub fn to_json(&self) -> Value {
        let mut options = Map::new();
        options.insert("delay".to_string(), Value::from(self.delay));
        options.insert("accumulate".to_string(), Value::Bool(self.accumulate));
        options.insert("timestamp".to_string(), Value::Bool(self.timestamp));
        Value::Object(options)
    }
}

impl TryFrom<Map<String, Value>> for ArrayConfig {
    type Error = SensorArrayError;

    fn try_from(options: Map<String, Value>) -> Result<Self> {
        Self::from_options(options)
    }
}

/// Boolean coercion of an option value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_loose_boolean_coercion() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be false");
        }
        for truthy in [json!(true), json!(1), json!(-1), json!("no"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be true");
        }
    }

    #[test]
    fn later_duplicate_option_wins() {
        let config = ArrayConfig::from_options([
            ("accumulate", json!(true)),
            ("accumulate", json!(false)),
        ])
        .unwrap();
        assert!(!config.accumulate);
    }

    #[test]
    fn serde_round_trip_goes_through_option_parsing() {
        let config = ArrayConfig::new()
            .with_delay(Delay::FrameSync)
            .with_accumulate(true);

        let value = serde_json::to_value(config).unwrap();
        assert_eq!(value, config.to_json());

        let back: ArrayConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);

        let unknown = serde_json::from_value::<ArrayConfig>(json!({ "rate": 3 }));
        assert!(unknown.is_err());
    }
}
