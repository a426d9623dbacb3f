// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{DateTime, Utc};
use std::ops::Deref;

/// Wall-clock time used for capture times and snapshot timestamps.
pub type Timestamp = DateTime<Utc>;

/// One reading popped from a sensor, together with the time it was captured.
///
/// A sample lives for exactly one merge step: it is created by
/// [`Sensor::pop_data`](crate::Sensor::pop_data), handed to
/// [`Sensor::extract_state`](crate::Sensor::extract_state) and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    pub value: T,
    captured_at: Timestamp,
}

impl<T> Sample<T> {
    /// Creates a sample captured now.
    pub fn new(value: T) -> Self {
        Self {
            value,
            captured_at: Utc::now(),
        }
    }

    /// Creates a sample with an explicit capture time.
    pub fn with_captured_at(value: T, captured_at: Timestamp) -> Self {
        Self { value, captured_at }
    }

    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U, F>(self, f: F) -> Sample<U>
    where
        F: FnOnce(T) -> U,
    {
        Sample {
            value: f(self.value),
            captured_at: self.captured_at,
        }
    }
}

impl<T> Deref for Sample<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
