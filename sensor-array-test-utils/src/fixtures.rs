// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Contributions shaped like the readings of common device sensors.

use chrono::DateTime;
use sensor_array_core::{NamedState, Timestamp};
use serde_json::json;

pub fn motion_state(x: f64, y: f64, z: f64) -> NamedState {
    NamedState::new().with("motion", json!({ "x": x, "y": y, "z": z }))
}

/// Two fields: orientation first, so only `orientation` is timestamped.
pub fn orientation_state(alpha: f64, beta: f64, gamma: f64) -> NamedState {
    NamedState::new()
        .with("orientation", json!({ "alpha": alpha, "beta": beta, "gamma": gamma }))
        .with("absolute", json!({ "value": false }))
}

pub fn battery_state(level: f64, charging: bool) -> NamedState {
    NamedState::new().with("battery", json!({ "level": level, "charging": charging }))
}

pub fn network_state(online: bool) -> NamedState {
    NamedState::new().with("network", json!({ "online": online }))
}

/// A contribution whose first field cannot carry a timestamp.
pub fn cpu_cores_state(cores: u32) -> NamedState {
    NamedState::new().with("cores", json!(cores))
}

/// A fixed capture time, `offset_ms` after 2023-11-14T22:13:20Z.
pub fn capture_time(offset_ms: i64) -> Timestamp {
    DateTime::from_timestamp_millis(1_700_000_000_000 + offset_ms).unwrap_or_default()
}
