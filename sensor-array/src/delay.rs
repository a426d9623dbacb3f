// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The pause between two merge cycles.
//!
//! A [`Delay`] is either a fixed number of milliseconds or [`Delay::FrameSync`], which
//! waits for the host's next rendering opportunity. Frame sync is requested with the
//! literal string [`FRAME_SYNC_SENTINEL`].
//!
//! Conversions validate their input:
//!
//! - non-negative integers (and integral floats such as `25.0`) are milliseconds;
//! - numeric strings are parsed the same way;
//! - negatives, fractions, NaN, infinities and any other string are rejected with
//!   [`SensorArrayError::Validation`].
//!
//! ```
//! use sensor_array::Delay;
//!
//! assert_eq!(Delay::try_from("requestAnimationFrame").unwrap(), Delay::FrameSync);
//! assert_eq!(Delay::try_from("40").unwrap(), Delay::Millis(40));
//! assert!(Delay::try_from(-1).is_err());
//! assert!(Delay::try_from(2.5).is_err());
//! ```

use core::fmt;
use core::time::Duration;

use sensor_array_error::SensorArrayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The string that selects frame-synchronised scheduling.
pub const FRAME_SYNC_SENTINEL: &str = "requestAnimationFrame";

const REQUIREMENT: &str =
    "Must be a non-negative integer millisecond delay or the string 'requestAnimationFrame'";

/// How long the merge loop suspends between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Delay {
    /// Sleep for a fixed number of milliseconds. `0` still yields to the executor.
    Millis(u64),
    /// Wait for the next frame of the runtime's frame clock.
    FrameSync,
}

impl Default for Delay {
    fn default() -> Self {
        Delay::Millis(0)
    }
}

impl Delay {
    pub const fn is_frame_sync(&self) -> bool {
        matches!(self, Delay::FrameSync)
    }

    /// The fixed delay in milliseconds, or `None` in frame-sync mode.
    pub const fn millis(&self) -> Option<u64> {
        match self {
            Delay::Millis(ms) => Some(*ms),
            Delay::FrameSync => None,
        }
    }

    pub const fn as_duration(&self) -> Option<Duration> {
        match self {
            Delay::Millis(ms) => Some(Duration::from_millis(*ms)),
            Delay::FrameSync => None,
        }
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delay::Millis(ms) => write!(f, "{ms}"),
            Delay::FrameSync => f.write_str(FRAME_SYNC_SENTINEL),
        }
    }
}

fn rejected(value: impl fmt::Display) -> SensorArrayError {
    SensorArrayError::validation(value, REQUIREMENT)
}

impl From<u64> for Delay {
    fn from(ms: u64) -> Self {
        Delay::Millis(ms)
    }
}

impl From<u32> for Delay {
    fn from(ms: u32) -> Self {
        Delay::Millis(u64::from(ms))
    }
}

impl From<Duration> for Delay {
    fn from(duration: Duration) -> Self {
        Delay::Millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl TryFrom<i64> for Delay {
    type Error = SensorArrayError;

    fn try_from(ms: i64) -> Result<Self, Self::Error> {
        u64::try_from(ms).map(Delay::Millis).map_err(|_| rejected(ms))
    }
}

impl TryFrom<i32> for Delay {
    type Error = SensorArrayError;

    fn try_from(ms: i32) -> Result<Self, Self::Error> {
        Delay::try_from(i64::from(ms))
    }
}

impl TryFrom<f64> for Delay {
    type Error = SensorArrayError;

    fn try_from(ms: f64) -> Result<Self, Self::Error> {
        if !ms.is_finite() || ms < 0.0 || ms.fract() != 0.0 || ms > u64::MAX as f64 {
            return Err(rejected(ms));
        }
        Ok(Delay::Millis(ms as u64))
    }
}

impl TryFrom<&str> for Delay {
    type Error = SensorArrayError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        if text == FRAME_SYNC_SENTINEL {
            return Ok(Delay::FrameSync);
        }
        let trimmed = text.trim();
        if let Ok(ms) = trimmed.parse::<u64>() {
            return Ok(Delay::Millis(ms));
        }
        match trimmed.parse::<f64>() {
            Ok(ms) => Delay::try_from(ms).map_err(|_| rejected(text)),
            Err(_) => Err(rejected(text)),
        }
    }
}

impl TryFrom<String> for Delay {
    type Error = SensorArrayError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Delay::try_from(text.as_str())
    }
}

impl TryFrom<&Value> for Delay {
    type Error = SensorArrayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => {
                if let Some(ms) = number.as_u64() {
                    Ok(Delay::Millis(ms))
                } else if let Some(ms) = number.as_i64() {
                    Delay::try_from(ms)
                } else {
                    number
                        .as_f64()
                        .ok_or_else(|| rejected(number))
                        .and_then(Delay::try_from)
                }
            }
            Value::String(text) => Delay::try_from(text.as_str()),
            other => Err(rejected(other)),
        }
    }
}

impl TryFrom<Value> for Delay {
    type Error = SensorArrayError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Delay::try_from(&value)
    }
}

impl From<Delay> for Value {
    fn from(delay: Delay) -> Self {
        match delay {
            Delay::Millis(ms) => Value::from(ms),
            Delay::FrameSync => Value::from(FRAME_SYNC_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_must_match_exactly() {
        assert!(Delay::try_from("requestanimationframe").is_err());
        assert!(Delay::try_from(" requestAnimationFrame").is_err());
    }

    #[test]
    fn integral_floats_are_milliseconds() {
        assert_eq!(Delay::try_from(25.0).unwrap(), Delay::Millis(25));
        assert_eq!(Delay::try_from("25.0").unwrap(), Delay::Millis(25));
    }

    #[test]
    fn rejects_non_finite_floats() {
        assert!(Delay::try_from(f64::NAN).is_err());
        assert!(Delay::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn json_values_follow_the_same_rules() {
        assert_eq!(Delay::try_from(&json!(16)).unwrap(), Delay::Millis(16));
        assert_eq!(
            Delay::try_from(&json!("requestAnimationFrame")).unwrap(),
            Delay::FrameSync
        );
        assert!(Delay::try_from(&json!(-3)).is_err());
        assert!(Delay::try_from(&json!(true)).is_err());
        assert!(Delay::try_from(&json!(null)).is_err());
    }

    #[test]
    fn serializes_as_number_or_sentinel() {
        assert_eq!(serde_json::to_value(Delay::Millis(5)).unwrap(), json!(5));
        assert_eq!(
            serde_json::to_value(Delay::FrameSync).unwrap(),
            json!("requestAnimationFrame")
        );
        let parsed: Delay = serde_json::from_value(json!("12")).unwrap();
        assert_eq!(parsed, Delay::Millis(12));
    }

    #[test]
    fn validation_error_reports_received_value() {
        let err = Delay::try_from("soon").unwrap_err();
        assert!(matches!(err, SensorArrayError::Validation { .. }));
        assert!(err.to_string().starts_with("Invalid delay value. Received: soon."));
    }
}
