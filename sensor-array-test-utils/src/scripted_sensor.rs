// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A sensor whose readings are scripted by the test.
//!
//! Each queued step is either a reading (a ready-made [`NamedState`]) or an injected
//! failure. The sensor reports data while steps remain and counts how often it was
//! polled, which lets tests check that idle sensors are never popped.
//!
//! ```rust
//! use sensor_array_test_utils::ScriptedSensor;
//! use serde_json::json;
//!
//! let sensor = ScriptedSensor::new("battery");
//! sensor.push_value("battery", json!({ "level": 0.5 }));
//! assert_eq!(sensor.pending(), 1);
//! assert_eq!(sensor.polls(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sensor_array_core::{NamedState, Sample, Sensor, Timestamp};
use sensor_array_error::{Result, SensorArrayError};
use serde_json::Value;

#[derive(Debug)]
enum Step {
    Reading(Sample<NamedState>),
    Failure(SensorArrayError),
}

#[derive(Debug)]
pub struct ScriptedSensor {
    name: String,
    script: Mutex<VecDeque<Step>>,
    polls: AtomicUsize,
    timestamp: AtomicBool,
    pop_latency: Option<Duration>,
}

impl ScriptedSensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            polls: AtomicUsize::new(0),
            timestamp: AtomicBool::new(false),
            pop_latency: None,
        }
    }

    /// Makes every `pop_data` suspend for `latency` (tokio time) before answering.
    #[must_use]
    pub fn with_pop_latency(mut self, latency: Duration) -> Self {
        self.pop_latency = Some(latency);
        self
    }

    /// Queues a reading captured now.
    pub fn push(&self, state: NamedState) {
        self.script
            .lock()
            .push_back(Step::Reading(Sample::new(state)));
    }

    /// Queues a reading with an explicit capture time.
    pub fn push_at(&self, state: NamedState, captured_at: Timestamp) {
        self.script
            .lock()
            .push_back(Step::Reading(Sample::with_captured_at(state, captured_at)));
    }

    /// Queues a single-field reading.
    pub fn push_value(&self, key: &str, value: Value) {
        self.push(NamedState::new().with(key, value));
    }

    /// Queues a failure; the poll that reaches it returns `error`.
    pub fn fail_next(&self, error: SensorArrayError) {
        self.script.lock().push_back(Step::Failure(error));
    }

    /// Number of `pop_data` calls so far.
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Number of queued steps.
    pub fn pending(&self) -> usize {
        self.script.lock().len()
    }

    pub fn is_timestamping(&self) -> bool {
        self.timestamp.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sensor for ScriptedSensor {
    type Reading = NamedState;

    fn name(&self) -> &str {
        &self.name
    }

    fn has_data(&self) -> bool {
        !self.script.lock().is_empty()
    }

    async fn pop_data(&self) -> Result<Sample<NamedState>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.pop_latency {
            tokio::time::sleep(latency).await;
        }

        let step = self.script.lock().pop_front();
        match step {
            Some(Step::Reading(sample)) => Ok(sample),
            Some(Step::Failure(error)) => Err(error),
            None => Err(SensorArrayError::invalid_state(format!(
                "scripted sensor `{}` polled without data",
                self.name
            ))),
        }
    }

    fn extract_state(&self, sample: Sample<NamedState>) -> Result<NamedState> {
        Ok(sample.into_inner())
    }

    fn timestamp(&self) -> bool {
        self.timestamp.load(Ordering::SeqCst)
    }

    fn set_timestamp(&self, enabled: bool) {
        self.timestamp.store(enabled, Ordering::SeqCst);
    }
}
