// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use sensor_array_core::{NamedState, Sample, Sensor};
use sensor_array_error::{Result, SensorArrayError};

type Extractor<T> = Box<dyn Fn(T) -> NamedState + Send + Sync>;

/// A ready-made [`Sensor`] fed by pushing readings into an unbounded queue.
///
/// Producers (event handlers, polling tasks, ...) call [`push`](BufferedSensor::push) or
/// hold a [`BufferedSender`]; the array pops one reading per cycle while the queue is
/// non-empty. Capture time is taken when a reading is pushed.
pub struct BufferedSensor<T> {
    name: String,
    tx: Sender<Sample<T>>,
    rx: Receiver<Sample<T>>,
    extract: Extractor<T>,
    timestamp: AtomicBool,
}

impl<T: Send + 'static> BufferedSensor<T> {
    /// Creates a sensor named `name` whose contribution is computed by `extract`.
    pub fn new<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(T) -> NamedState + Send + Sync + 'static,
    {
        let (tx, rx) = async_channel::unbounded();
        Self {
            name: name.into(),
            tx,
            rx,
            extract: Box::new(extract),
            timestamp: AtomicBool::new(false),
        }
    }

    /// Buffers a reading captured now.
    pub fn push(&self, reading: T) {
        self.push_sample(Sample::new(reading));
    }

    /// Buffers a reading with an explicit capture time.
    pub fn push_sample(&self, sample: Sample<T>) {
        // Cannot fail: `self` keeps the receiving half open.
        let _ = self.tx.try_send(sample);
    }

    /// A cloneable producer handle, usable from other tasks.
    pub fn sender(&self) -> BufferedSender<T> {
        BufferedSender {
            name: self.name.clone(),
            tx: self.tx.clone(),
        }
    }

    /// Number of buffered readings.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> fmt::Debug for BufferedSensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedSensor")
            .field("name", &self.name)
            .field("buffered", &self.rx.len())
            .field("timestamp", &self.timestamp.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Send + 'static> Sensor for BufferedSensor<T> {
    type Reading = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn has_data(&self) -> bool {
        !self.rx.is_empty()
    }

    async fn pop_data(&self) -> Result<Sample<T>> {
        self.rx.recv().await.map_err(|_| {
            SensorArrayError::invalid_state(format!("sensor `{}` buffer closed", self.name))
        })
    }

    fn extract_state(&self, sample: Sample<T>) -> Result<NamedState> {
        Ok((self.extract)(sample.into_inner()))
    }

    fn timestamp(&self) -> bool {
        self.timestamp.load(Ordering::Relaxed)
    }

    fn set_timestamp(&self, enabled: bool) {
        self.timestamp.store(enabled, Ordering::Relaxed);
    }
}

/// Producer half of a [`BufferedSensor`].
pub struct BufferedSender<T> {
    name: String,
    tx: Sender<Sample<T>>,
}

impl<T> Clone for BufferedSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl<T> fmt::Debug for BufferedSender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedSender")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> BufferedSender<T> {
    /// Buffers a reading captured now.
    ///
    /// # Errors
    /// [`SensorArrayError::InvalidState`] once the sensor has been dropped.
    pub fn push(&self, reading: T) -> Result<()> {
        self.push_sample(Sample::new(reading))
    }

    /// Buffers a reading with an explicit capture time.
    ///
    /// # Errors
    /// [`SensorArrayError::InvalidState`] once the sensor has been dropped.
    pub fn push_sample(&self, sample: Sample<T>) -> Result<()> {
        self.tx.try_send(sample).map_err(|_| {
            SensorArrayError::invalid_state(format!("sensor `{}` was dropped", self.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level_sensor() -> BufferedSensor<u8> {
        BufferedSensor::new("level", |level: u8| {
            NamedState::new().with("level", json!({ "value": level }))
        })
    }

    #[tokio::test]
    async fn pops_in_push_order() {
        let sensor = level_sensor();
        sensor.push(1);
        sensor.push(2);

        assert_eq!(sensor.pop_data().await.unwrap().value, 1);
        assert_eq!(sensor.pop_data().await.unwrap().value, 2);
        assert!(!sensor.has_data());
    }

    #[test]
    fn sender_fails_once_sensor_is_gone() {
        let sensor = level_sensor();
        let sender = sensor.sender();
        assert!(sender.push(3).is_ok());
        assert_eq!(sensor.len(), 1);

        drop(sensor);
        assert!(sender.push(4).is_err());
    }
}
