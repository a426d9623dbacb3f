// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the sensor-array workspace.
//!
//! This crate is meant for development and testing only.
//!
//! # Key Types
//!
//! - [`ScriptedSensor`] - a [`Sensor`](sensor_array_core::Sensor) whose readings and
//!   failures are queued by the test, with a poll counter
//! - [`ManualFrameClock`] / [`ManualRuntime`] - frame-synchronised scheduling driven
//!   explicitly by the test
//!
//! # Helpers
//!
//! - [`unwrap_stream`], [`unwrap_error`] - take the next item of a snapshot stream
//! - [`assert_no_element_emitted`], [`assert_stream_ended`] - bounded waits built on
//!   tokio time, deterministic under `tokio::time::pause()`
//! - [`fixtures`] - contributions shaped like common device sensors
//! - [`init_tracing`] - log output for failing tests
//!
//! ```rust
//! use sensor_array_test_utils::assert_no_element_emitted;
//! use futures::stream;
//!
//! # async fn example() {
//! let mut empty = stream::pending::<i32>();
//! assert_no_element_emitted(&mut empty, 10).await;
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fixtures;
pub mod helpers;
pub mod manual_frame_clock;
pub mod scripted_sensor;
mod tracing_setup;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_error, unwrap_stream};
pub use manual_frame_clock::{ManualFrameClock, ManualRuntime};
pub use scripted_sensor::ScriptedSensor;
pub use tracing_setup::init_tracing;
