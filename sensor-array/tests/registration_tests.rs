// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use sensor_array::{
    ArrayConfig, Registration, RegistrationWarning, Sensor, SensorArray, SensorArrayError,
    SharedSensor,
};
use sensor_array_test_utils::ScriptedSensor;

#[test]
fn test_add_is_idempotent_per_instance() {
    // Arrange
    let array = SensorArray::new();
    let sensor = Arc::new(ScriptedSensor::new("motion"));

    // Act
    let first = array.add(sensor.clone());
    let second = array.add(sensor.clone());

    // Assert
    assert_eq!(first, Registration::Added);
    assert_eq!(second, Registration::AlreadyRegistered);
    assert_eq!(array.len(), 1);
    assert!(array.contains(&sensor));
}

#[test]
fn test_distinct_instances_with_same_name_are_both_registered() {
    let array = SensorArray::new();

    assert!(array.add(Arc::new(ScriptedSensor::new("motion"))).is_added());
    assert!(array.add(Arc::new(ScriptedSensor::new("motion"))).is_added());
    assert_eq!(array.len(), 2);
}

#[test]
fn test_add_propagates_timestamp_setting() {
    // Arrange
    let stamping = SensorArray::new();
    let silent = SensorArray::with_config(ArrayConfig::new().with_timestamp(false));
    let a = Arc::new(ScriptedSensor::new("a"));
    let b = Arc::new(ScriptedSensor::new("b"));
    b.set_timestamp(true);

    // Act
    stamping.add(a.clone());
    silent.add(b.clone());

    // Assert
    assert!(a.is_timestamping());
    assert!(!b.is_timestamping());
}

#[test]
fn test_set_timestamp_reaches_registered_sensors() {
    let array = SensorArray::new();
    let sensor = Arc::new(ScriptedSensor::new("battery"));
    array.add(sensor.clone());

    array.set_timestamp(false);

    assert!(!sensor.is_timestamping());
}

#[test]
fn test_remove_unregisters_by_identity() {
    // Arrange
    let array = SensorArray::new();
    let kept = Arc::new(ScriptedSensor::new("kept"));
    let removed = Arc::new(ScriptedSensor::new("removed"));
    array.add(kept.clone());
    array.add(removed.clone());

    // Act
    let was_registered = array.remove(&removed);
    let again = array.remove(&removed);

    // Assert
    assert!(was_registered);
    assert!(!again);
    assert_eq!(array.len(), 1);
    assert!(array.contains(&kept));
    assert!(!array.contains(&removed));
}

#[test]
fn test_remove_unknown_sensor_is_a_no_op() {
    let array = SensorArray::new();
    array.add(Arc::new(ScriptedSensor::new("a")));

    assert!(!array.remove(&Arc::new(ScriptedSensor::new("a"))));
    assert_eq!(array.len(), 1);
}

#[test]
fn test_remove_accepts_erased_handle() {
    let array = SensorArray::new();
    let sensor = Arc::new(ScriptedSensor::new("a"));
    let erased: SharedSensor = sensor.clone();
    array.add_shared(erased.clone());

    assert!(array.contains(&sensor));
    assert!(array.remove(&erased));
    assert!(array.is_empty());
}

#[test]
fn test_try_add_reports_duplicate_as_error() {
    // Arrange
    let array = SensorArray::new();
    let sensor = Arc::new(ScriptedSensor::new("network"));
    array.try_add(sensor.clone()).unwrap();

    // Act
    let err = array.try_add(sensor).unwrap_err();

    // Assert
    assert!(!err.is_fatal());
    assert_eq!(err.sensor_name(), Some("network"));
    assert!(matches!(
        err,
        SensorArrayError::Registration(RegistrationWarning::AlreadyRegistered { .. })
    ));
}

#[test]
fn test_from_sensors_skips_duplicates_without_aborting() {
    // Arrange
    let a = Arc::new(ScriptedSensor::new("a"));
    let b = Arc::new(ScriptedSensor::new("b"));
    let candidates: Vec<SharedSensor> = vec![
        a.clone() as SharedSensor,
        a.clone() as SharedSensor,
        b.clone() as SharedSensor,
    ];

    // Act
    let array = SensorArray::from_sensors(ArrayConfig::default(), candidates);

    // Assert
    assert_eq!(array.len(), 2);
    let names: Vec<String> = array
        .sensors()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_add_all_returns_diagnostics() {
    let array = SensorArray::new();
    let a = Arc::new(ScriptedSensor::new("a"));
    array.add(a.clone());

    let skipped = array.add_all(vec![
        a as SharedSensor,
        Arc::new(ScriptedSensor::new("b")) as SharedSensor,
    ]);

    assert_eq!(
        skipped,
        vec![RegistrationWarning::AlreadyRegistered {
            sensor: "a".to_string()
        }]
    );
    assert_eq!(array.len(), 2);
}

#[test]
fn test_clones_share_membership() {
    let array = SensorArray::new();
    let handle = array.clone();

    handle.add(Arc::new(ScriptedSensor::new("a")));

    assert_eq!(array.len(), 1);
}
