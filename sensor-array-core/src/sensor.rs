// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The sensor capability contract.
//!
//! Anything that can report whether it holds a fresh reading and produce that reading
//! on demand is a [`Sensor`]. Because registration is bounded by this trait, objects that
//! do not satisfy the contract are rejected by the compiler rather than at run time.
//!
//! Sensors are heterogeneous (each has its own `Reading` type), so an array stores them
//! type-erased as [`SharedSensor`]. The erasure is provided by a blanket [`DynSensor`]
//! implementation and never needs to be written by hand.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use sensor_array_core::{NamedState, Result, Sample, Sensor};
//! use serde_json::json;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! struct CpuCores {
//!     timestamp: AtomicBool,
//! }
//!
//! #[async_trait]
//! impl Sensor for CpuCores {
//!     type Reading = usize;
//!
//!     fn has_data(&self) -> bool {
//!         true
//!     }
//!
//!     async fn pop_data(&self) -> Result<Sample<usize>> {
//!         Ok(Sample::new(8))
//!     }
//!
//!     fn extract_state(&self, sample: Sample<usize>) -> Result<NamedState> {
//!         Ok(NamedState::new().with("cpu", json!({ "cores": sample.value })))
//!     }
//!
//!     fn timestamp(&self) -> bool {
//!         self.timestamp.load(Ordering::Relaxed)
//!     }
//!
//!     fn set_timestamp(&self, enabled: bool) {
//!         self.timestamp.store(enabled, Ordering::Relaxed);
//!     }
//! }
//! ```

use crate::named_state::NamedState;
use crate::sample::{Sample, Timestamp};
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use sensor_array_error::Result;
use std::sync::Arc;

/// A source of readings that can be polled without blocking.
#[async_trait]
pub trait Sensor: Send + Sync + 'static {
    /// The raw reading type this sensor produces.
    type Reading: Send;

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether a reading is buffered and ready to be popped.
    ///
    /// Must not block and must not have side effects.
    fn has_data(&self) -> bool;

    /// Removes and returns the next buffered reading.
    ///
    /// May suspend. Only called after `has_data` returned `true` in the same cycle.
    async fn pop_data(&self) -> Result<Sample<Self::Reading>>;

    /// Turns a sample into this sensor's contribution to a snapshot.
    fn extract_state(&self, sample: Sample<Self::Reading>) -> Result<NamedState>;

    /// Whether this sensor was asked to timestamp its readings.
    fn timestamp(&self) -> bool;

    /// Set by the array on registration to mirror its own `timestamp` setting.
    fn set_timestamp(&self, enabled: bool);
}

/// One sensor's share of a merge cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub state: NamedState,
    pub captured_at: Timestamp,
}

/// Object-safe view of a [`Sensor`], implemented for every sensor.
pub trait DynSensor: Send + Sync {
    fn name(&self) -> &str;

    fn has_data(&self) -> bool;

    fn timestamp(&self) -> bool;

    fn set_timestamp(&self, enabled: bool);

    /// Pops one sample and extracts its state in a single step.
    fn next_contribution(&self) -> BoxFuture<'_, Result<Contribution>>;
}

impl<S: Sensor> DynSensor for S {
    fn name(&self) -> &str {
        Sensor::name(self)
    }

    fn has_data(&self) -> bool {
        Sensor::has_data(self)
    }

    fn timestamp(&self) -> bool {
        Sensor::timestamp(self)
    }

    fn set_timestamp(&self, enabled: bool) {
        Sensor::set_timestamp(self, enabled);
    }

    fn next_contribution(&self) -> BoxFuture<'_, Result<Contribution>> {
        async move {
            let sample = self.pop_data().await?;
            let captured_at = sample.captured_at();
            let state = self.extract_state(sample)?;
            Ok(Contribution { state, captured_at })
        }
        .boxed()
    }
}

/// A type-erased, shareable sensor. Identity is the address of the allocation.
pub type SharedSensor = Arc<dyn DynSensor>;
