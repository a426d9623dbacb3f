// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::Mutex;
use sensor_array_core::{
    DynSensor, NamedState, Result, Sample, Sensor, SensorArrayError, SharedSensor,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Thermometer {
    readings: Mutex<VecDeque<Sample<f64>>>,
    timestamp: AtomicBool,
}

#[async_trait]
impl Sensor for Thermometer {
    type Reading = f64;

    fn name(&self) -> &str {
        "thermometer"
    }

    fn has_data(&self) -> bool {
        !self.readings.lock().is_empty()
    }

    async fn pop_data(&self) -> Result<Sample<f64>> {
        self.readings
            .lock()
            .pop_front()
            .ok_or_else(|| SensorArrayError::invalid_state("no buffered reading"))
    }

    fn extract_state(&self, sample: Sample<f64>) -> Result<NamedState> {
        Ok(NamedState::new().with("temperature", json!({ "celsius": sample.value })))
    }

    fn timestamp(&self) -> bool {
        self.timestamp.load(Ordering::Relaxed)
    }

    fn set_timestamp(&self, enabled: bool) {
        self.timestamp.store(enabled, Ordering::Relaxed);
    }
}

#[tokio::test]
async fn test_next_contribution_pops_and_extracts() -> anyhow::Result<()> {
    // Arrange
    let captured_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    let sensor = Thermometer::default();
    sensor
        .readings
        .lock()
        .push_back(Sample::with_captured_at(21.5, captured_at));

    // Act
    let contribution = DynSensor::next_contribution(&sensor).await?;

    // Assert
    assert_eq!(contribution.captured_at, captured_at);
    assert_eq!(
        contribution.state.get("temperature"),
        Some(&json!({ "celsius": 21.5 }))
    );
    assert!(!DynSensor::has_data(&sensor));

    Ok(())
}

#[tokio::test]
async fn test_next_contribution_propagates_pop_failure() {
    let sensor = Thermometer::default();

    let err = DynSensor::next_contribution(&sensor).await.unwrap_err();

    assert!(matches!(err, SensorArrayError::InvalidState { .. }));
}

#[test]
fn test_erased_sensor_forwards_timestamp_flag() {
    let sensor: SharedSensor = Arc::new(Thermometer::default());

    sensor.set_timestamp(true);
    assert!(sensor.timestamp());
    assert_eq!(sensor.name(), "thermometer");
}

#[test]
fn test_sample_map_keeps_capture_time() {
    let sample = Sample::new(3_u8);
    let captured_at = sample.captured_at();

    let mapped = sample.map(u32::from);

    assert_eq!(*mapped, 3_u32);
    assert_eq!(mapped.captured_at(), captured_at);
}
