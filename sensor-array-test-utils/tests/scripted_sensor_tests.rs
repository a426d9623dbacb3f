// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use sensor_array_core::{Sensor, SensorArrayError};
use sensor_array_test_utils::fixtures::{battery_state, capture_time, network_state};
use sensor_array_test_utils::ScriptedSensor;
use tokio::time::Instant;

#[tokio::test]
async fn test_pops_readings_in_script_order() -> anyhow::Result<()> {
    // Arrange
    let sensor = ScriptedSensor::new("battery");
    sensor.push(battery_state(0.9, true));
    sensor.push_at(battery_state(0.8, false), capture_time(3));

    // Act
    let first = sensor.pop_data().await?;
    let second = sensor.pop_data().await?;

    // Assert
    assert_eq!(first.value, battery_state(0.9, true));
    assert_eq!(second.captured_at(), capture_time(3));
    assert_eq!(sensor.polls(), 2);
    assert!(!sensor.has_data());

    Ok(())
}

#[tokio::test]
async fn test_injected_failure_is_returned_in_turn() -> anyhow::Result<()> {
    // Arrange
    let sensor = ScriptedSensor::new("network");
    sensor.fail_next(SensorArrayError::invalid_state("offline"));
    sensor.push(network_state(true));

    // Act
    let failure = sensor.pop_data().await;
    let reading = sensor.pop_data().await?;

    // Assert
    assert!(matches!(failure, Err(SensorArrayError::InvalidState { .. })));
    assert_eq!(reading.value, network_state(true));

    Ok(())
}

#[tokio::test]
async fn test_polling_an_empty_script_fails() {
    let sensor = ScriptedSensor::new("empty");

    let result = sensor.pop_data().await;

    assert!(result.is_err());
    assert_eq!(sensor.polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pop_latency_suspends_the_poll() -> anyhow::Result<()> {
    // Arrange
    let sensor = ScriptedSensor::new("slow").with_pop_latency(Duration::from_millis(40));
    sensor.push(network_state(false));
    let start = Instant::now();

    // Act
    let _ = sensor.pop_data().await?;

    // Assert
    assert!(start.elapsed() >= Duration::from_millis(40));

    Ok(())
}

#[test]
fn test_extract_state_passes_reading_through() -> anyhow::Result<()> {
    let sensor = ScriptedSensor::new("battery");
    let sample = sensor_array_core::Sample::new(battery_state(0.2, false));

    let state = sensor.extract_state(sample)?;

    assert_eq!(state, battery_state(0.2, false));
    Ok(())
}
