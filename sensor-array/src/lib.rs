// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sensor Array
//!
//! Merges any number of independent, asynchronously producing sensors into one
//! ordered stream of combined state snapshots, on a cadence chosen by the caller.
//!
//! ## Overview
//!
//! A [`SensorArray`] owns a set of [`Sensor`]s. Consuming its [`stream`](SensorArray::stream)
//! drives a merge loop that, every cycle, polls the sensors that have data, merges their
//! contributions into one [`NamedState`] and yields it as a [`Snapshot`]. Between cycles
//! the loop pauses for a fixed [`Delay`] or until the next frame of the runtime's frame
//! clock.
//!
//! - **Snapshot mode** (default): each snapshot holds only this cycle's contributions.
//! - **Accumulate mode**: cycles are folded into one cumulative state and every snapshot
//!   is a handle to it.
//! - **Timestamping** (default on): each contributed field carries its sample's capture
//!   time under `$timestamp`, and each snapshot carries its assembly time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use sensor_array::{BufferedSensor, SensorArray};
//! use sensor_array_core::NamedState;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let array = SensorArray::with_options([("delay", json!(100))])?;
//!
//!     let motion = Arc::new(BufferedSensor::new("motion", |(x, y): (f64, f64)| {
//!         NamedState::new().with("motion", json!({ "x": x, "y": y }))
//!     }));
//!     array.add(motion.clone());
//!
//!     let feed = motion.sender();
//!     tokio::spawn(async move {
//!         let _ = feed.push((0.1, 9.8));
//!     });
//!
//!     let mut snapshots = array.stream();
//!     while let Some(item) = snapshots.next().await {
//!         let snapshot = item.into_result()?;
//!         println!("{}", serde_json::Value::from(snapshot));
//!     }
//!     Ok(())
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

mod logging;

pub mod array;
pub mod buffered;
pub mod config;
pub mod delay;
pub mod snapshot;
pub mod stream;

pub use array::{MergePolicy, Registration, SensorArray};
pub use buffered::{BufferedSender, BufferedSensor};
pub use config::ArrayConfig;
pub use delay::{Delay, FRAME_SYNC_SENTINEL};
pub use snapshot::{SharedState, Snapshot};
pub use stream::SnapshotStream;

pub use sensor_array_core::{
    IntoStream, Lifecycle, NamedState, Sample, Sensor, SharedSensor, StreamItem, TIMESTAMP_KEY,
};
pub use sensor_array_error::{RegistrationWarning, Result, SensorArrayError};

#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = sensor_array_runtime::impls::tokio::TokioRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = sensor_array_runtime::impls::smol::SmolRuntime;

#[cfg(all(
    feature = "runtime-wasm",
    not(feature = "runtime-tokio"),
    not(feature = "runtime-smol")
))]
pub type DefaultRuntime = sensor_array_runtime::impls::wasm::WasmRuntime;

#[cfg(not(any(
    feature = "runtime-tokio",
    feature = "runtime-smol",
    feature = "runtime-wasm"
)))]
compile_error!("enable one of the `runtime-tokio`, `runtime-smol` or `runtime-wasm` features");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArrayConfig, BufferedSensor, Delay, IntoStream, NamedState, Sample, Sensor, SensorArray,
        Snapshot, StreamItem,
    };
}
