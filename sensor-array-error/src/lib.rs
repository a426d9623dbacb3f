// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the sensor-array stream multiplexer
//!
//! This crate defines the root [`SensorArrayError`] type shared by every member of the
//! workspace. Configuration and validation failures are fatal at the point where they are
//! raised; registration problems are reported as [`RegistrationWarning`] values and never
//! abort anything; sensor failures surface through the snapshot stream and end the
//! consumption that observed them.
//!
//! # Examples
//!
//! ```
//! use sensor_array_error::{Result, SensorArrayError};
//!
//! fn parse_option(key: &str) -> Result<()> {
//!     Err(SensorArrayError::configuration(key, "42"))
//! }
//!
//! let err = parse_option("colour").unwrap_err();
//! assert_eq!(err.to_string(), "Unknown option: colour = 42");
//! ```

use std::convert::Infallible;
use std::sync::Arc;

/// Root error type for all sensor-array operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum SensorArrayError {
    /// An option outside the recognised set was supplied at construction
    ///
    /// Construction is aborted; no partially configured array is produced.
    #[error("Unknown option: {key} = {value}")]
    Configuration {
        /// The offending option name
        key: String,
        /// The value supplied for it, rendered for diagnostics
        value: String,
    },

    /// A delay value could not be accepted
    ///
    /// The previously stored delay is left untouched.
    #[error("Invalid delay value. Received: {value}. {reason}")]
    Validation {
        /// The rejected input, rendered for diagnostics
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A configuration document could not be parsed
    #[error("Failed to parse {context}")]
    Parse {
        /// What was being parsed, followed by the parser's message
        context: String,
    },

    /// A sensor was not registered
    ///
    /// Registration problems are diagnostics. They are only returned as errors
    /// when a caller explicitly asks for strict registration.
    #[error("Sensor registration skipped: {0}")]
    Registration(#[from] RegistrationWarning),

    /// A sensor failed while producing or extracting a sample
    #[error("Sensor `{sensor}` failed: {source}")]
    Sensor {
        /// Name of the failing sensor
        sensor: String,
        /// The collaborator's own error
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// An operation was attempted in a state that does not allow it
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },
}

/// Non-fatal registration diagnostics
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationWarning {
    /// The very same sensor instance is already part of the array
    #[error("sensor `{sensor}` is already registered")]
    AlreadyRegistered {
        /// Name of the sensor that was offered twice
        sensor: String,
    },
}

impl SensorArrayError {
    /// Create a configuration error for an unknown option
    pub fn configuration(key: impl Into<String>, value: impl ToString) -> Self {
        Self::Configuration {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Create a validation error for a rejected delay value
    pub fn validation(value: impl ToString, reason: impl Into<String>) -> Self {
        Self::Validation {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a parse error with the given context
    pub fn parse(context: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
        }
    }

    /// Wrap a failure raised by a sensor
    pub fn sensor_error(
        sensor: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Sensor {
            sensor: sensor.into(),
            source: Arc::new(error),
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Whether this error aborts the operation that raised it
    ///
    /// Only registration diagnostics are non-fatal.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Registration(_))
    }

    /// Whether this error stems from configuring the array
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Validation { .. } | Self::Parse { .. }
        )
    }

    /// Name of the sensor involved, if any
    #[must_use]
    pub fn sensor_name(&self) -> Option<&str> {
        match self {
            Self::Sensor { sensor, .. } => Some(sensor),
            Self::Registration(RegistrationWarning::AlreadyRegistered { sensor }) => Some(sensor),
            _ => None,
        }
    }
}

impl From<Infallible> for SensorArrayError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Specialized Result type for sensor-array operations
pub type Result<T> = std::result::Result<T, SensorArrayError>;

/// Extension trait for turning arbitrary errors into sensor failures
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`, so sensor
/// implementations can write `io_result.map_err(|e| e.into_sensor_error(self.name()))`.
pub trait IntoSensorError {
    /// Attribute this error to the named sensor
    fn into_sensor_error(self, sensor: &str) -> SensorArrayError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoSensorError for E {
    fn into_sensor_error(self, sensor: &str) -> SensorArrayError {
        SensorArrayError::sensor_error(sensor, self)
    }
}

/// Helper trait for adding parse context to foreign `Result`s
pub trait ResultExt<T> {
    /// Convert the error into [`SensorArrayError::Parse`] prefixed with `context`
    ///
    /// # Errors
    /// Returns `Err(SensorArrayError::Parse)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::context`], building the context lazily
    ///
    /// # Errors
    /// Returns `Err(SensorArrayError::Parse)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SensorArrayError::parse(format!("{}: {e}", context.into())))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SensorArrayError::parse(format!("{}: {e}", f())))
    }
}
