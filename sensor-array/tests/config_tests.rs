// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sensor_array::{ArrayConfig, Delay, SensorArray, SensorArrayError, FRAME_SYNC_SENTINEL};
use serde_json::json;

#[test]
fn test_defaults() {
    let array = SensorArray::new();

    assert_eq!(array.delay(), Delay::Millis(0));
    assert!(!array.accumulate());
    assert!(array.timestamp());
    assert!(array.is_empty());
}

#[test]
fn test_delay_round_trips_for_valid_inputs() -> anyhow::Result<()> {
    // Arrange
    let array = SensorArray::new();

    // Act & Assert
    for ms in [0_u64, 1, 16, 250, 60_000] {
        array.set_delay(ms)?;
        assert_eq!(array.delay(), Delay::Millis(ms));
    }

    array.set_delay(FRAME_SYNC_SENTINEL)?;
    assert_eq!(array.delay(), Delay::FrameSync);
    assert!(array.delay().is_frame_sync());

    array.set_delay("42")?;
    assert_eq!(array.delay(), Delay::Millis(42));

    array.set_delay(Delay::FrameSync)?;
    assert_eq!(array.delay().to_string(), "requestAnimationFrame");

    Ok(())
}

#[test]
fn test_frame_sync_can_be_left_again() -> anyhow::Result<()> {
    let array = SensorArray::new();
    array.set_delay(FRAME_SYNC_SENTINEL)?;

    array.set_delay(30_u64)?;

    assert_eq!(array.delay(), Delay::Millis(30));
    assert!(!array.delay().is_frame_sync());
    Ok(())
}

#[test]
fn test_invalid_delay_is_rejected_and_prior_value_kept() -> anyhow::Result<()> {
    // Arrange
    let array = SensorArray::new();
    array.set_delay(25_u64)?;

    // Act
    let negative = array.set_delay(-1);
    let fractional = array.set_delay(12.5);
    let not_a_number = array.set_delay("fast");
    let nan = array.set_delay(f64::NAN);
    let null = array.set_delay(&json!(null));

    // Assert
    for result in [negative, fractional, not_a_number, nan, null] {
        assert!(matches!(result, Err(SensorArrayError::Validation { .. })));
    }
    assert_eq!(array.delay(), Delay::Millis(25));

    Ok(())
}

#[test]
fn test_unknown_option_fails_construction() {
    // Act
    let result = SensorArray::with_options([("delay", json!(5)), ("colour", json!("red"))]);

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(
        &err,
        SensorArrayError::Configuration { key, value } if key == "colour" && value == "\"red\""
    ));
    assert!(err.is_configuration());
}

#[test]
fn test_invalid_delay_option_fails_construction() {
    let err = SensorArray::with_options([("delay", json!(-20))]).unwrap_err();

    assert!(matches!(err, SensorArrayError::Validation { .. }));
}

#[test]
fn test_options_are_coerced_to_booleans() -> anyhow::Result<()> {
    // Act
    let array = SensorArray::with_options([
        ("accumulate", json!(1)),
        ("timestamp", json!("")),
        ("delay", json!("requestAnimationFrame")),
    ])?;

    // Assert
    assert!(array.accumulate());
    assert!(!array.timestamp());
    assert_eq!(array.delay(), Delay::FrameSync);

    Ok(())
}

#[test]
fn test_config_from_json_document() -> anyhow::Result<()> {
    let config = ArrayConfig::from_json_str(r#"{ "delay": 100, "accumulate": true }"#)?;

    assert_eq!(
        config,
        ArrayConfig::new()
            .with_delay(100_u64)
            .with_accumulate(true)
            .with_timestamp(true)
    );
    Ok(())
}

#[test]
fn test_config_from_json_null_uses_defaults() -> anyhow::Result<()> {
    assert_eq!(ArrayConfig::from_json(&json!(null))?, ArrayConfig::default());
    Ok(())
}

#[test]
fn test_config_from_json_rejects_non_objects() {
    let err = ArrayConfig::from_json(&json!([1, 2])).unwrap_err();

    assert!(matches!(err, SensorArrayError::Parse { .. }));
}

#[test]
fn test_config_from_malformed_json_is_a_parse_error() {
    let err = ArrayConfig::from_json_str("{ delay: ").unwrap_err();

    assert!(matches!(err, SensorArrayError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse JSON configuration"));
}

#[test]
fn test_config_from_toml_document() -> anyhow::Result<()> {
    // Arrange
    let document = r#"
        delay = "requestAnimationFrame"
        accumulate = true
        timestamp = false
    "#;

    // Act
    let config = ArrayConfig::from_toml_str(document)?;

    // Assert
    assert_eq!(config.delay, Delay::FrameSync);
    assert!(config.accumulate);
    assert!(!config.timestamp);

    Ok(())
}

#[test]
fn test_config_from_toml_rejects_unknown_keys() {
    let err = ArrayConfig::from_toml_str("rate = 3").unwrap_err();

    assert_eq!(err.to_string(), "Unknown option: rate = 3");
}

#[test]
fn test_runtime_setters_update_config() {
    let array = SensorArray::with_config(ArrayConfig::new().with_delay(Delay::FrameSync));

    array.set_accumulate(true);
    array.set_timestamp(false);

    assert_eq!(
        array.config(),
        ArrayConfig {
            delay: Delay::FrameSync,
            accumulate: true,
            timestamp: false,
        }
    );
}
