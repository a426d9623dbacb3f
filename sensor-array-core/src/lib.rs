// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core traits and types shared by the sensor-array crates.
//!
//! - [`Sensor`] is the capability contract every data source implements.
//! - [`Sample`] is the unit produced by one poll of a sensor.
//! - [`NamedState`] is the keyed state a sensor contributes to a snapshot.
//! - [`StreamingState`] is the array-wide `Idle`/`Streaming` lifecycle flag.
//! - [`StreamItem`] carries either a value or the error that ends a sequence.
pub mod into_stream;
pub mod named_state;
pub mod sample;
pub mod sensor;
pub mod stream_item;
pub mod streaming_state;

pub use self::into_stream::IntoStream;
pub use self::named_state::{NamedState, TIMESTAMP_KEY};
pub use self::sample::{Sample, Timestamp};
pub use self::sensor::{Contribution, DynSensor, Sensor, SharedSensor};
pub use self::stream_item::StreamItem;
pub use self::streaming_state::{Lifecycle, StreamingState};
pub use sensor_array_error::{Result, SensorArrayError};
