// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use sensor_array_core::{
    IntoStream, Lifecycle, NamedState, Sensor, SharedSensor, StreamItem, StreamingState,
};
use sensor_array_error::{RegistrationWarning, Result, SensorArrayError};
use sensor_array_runtime::runtime::Runtime;
use serde_json::Value;

use crate::config::ArrayConfig;
use crate::delay::Delay;
use crate::snapshot::{SharedState, Snapshot};
use crate::stream::{snapshot_stream, SnapshotStream};
use crate::DefaultRuntime;

/// Outcome of [`SensorArray::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The same sensor instance was already registered; nothing changed.
    AlreadyRegistered,
}

impl Registration {
    pub fn is_added(self) -> bool {
        self == Registration::Added
    }
}

/// How contributions that share a key are combined within one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum MergePolicy {
    /// Contributions are applied in registration order; a later sensor overwrites the
    /// keys of an earlier one.
    #[default]
    LastWins,
}

impl MergePolicy {
    pub fn apply(self, merged: &mut NamedState, contribution: NamedState) {
        match self {
            MergePolicy::LastWins => merged.merge(contribution),
        }
    }
}

pub(crate) struct Shared<R: Runtime> {
    pub(crate) sensors: Mutex<Vec<SharedSensor>>,
    pub(crate) config: Mutex<ArrayConfig>,
    pub(crate) streaming: StreamingState,
    pub(crate) cumulative: SharedState,
    pub(crate) merge_policy: MergePolicy,
    pub(crate) timer: R::Timer,
    pub(crate) frame_clock: R::FrameClock,
}

/// Identity of a sensor allocation, independent of the pointer's metadata.
fn address<T: ?Sized>(sensor: &Arc<T>) -> *const () {
    Arc::as_ptr(sensor).cast::<()>()
}

/// Multiplexes a set of sensors into one stream of merged snapshots.
///
/// The array is a handle: clones share sensors, configuration, lifecycle and cumulative
/// state. All methods take `&self`.
///
/// Every call to [`stream`](SensorArray::stream) (or [`IntoStream::into_stream`] on
/// `&SensorArray`) returns a fresh sequence, but all of them share one
/// [`StreamingState`]: consuming any sequence starts them all, [`stop`](SensorArray::stop)
/// ends them all.
///
/// # Example
///
/// ```
/// use futures::StreamExt;
/// use sensor_array::{ArrayConfig, BufferedSensor, SensorArray};
/// use sensor_array_core::NamedState;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let battery = Arc::new(BufferedSensor::new("battery", |level: f64| {
///     NamedState::new().with("battery", json!({ "level": level }))
/// }));
///
/// let array = SensorArray::with_config(ArrayConfig::new().with_timestamp(false));
/// array.add(battery.clone());
///
/// battery.push(0.8);
/// let mut stream = array.stream();
/// let snapshot = stream.next().await.unwrap().unwrap();
/// assert_eq!(snapshot.get("battery"), Some(json!({ "level": 0.8 })));
///
/// array.stop();
/// # Ok(())
/// # }
/// ```
pub struct SensorArray<R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<R>>,
}

impl<R: Runtime> Clone for SensorArray<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Runtime> fmt::Debug for SensorArray<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorArray")
            .field("sensors", &self.len())
            .field("config", &self.config())
            .field("lifecycle", &self.lifecycle())
            .finish()
    }
}

impl SensorArray<DefaultRuntime> {
    /// An empty array with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ArrayConfig::default())
    }

    pub fn with_config(config: ArrayConfig) -> Self {
        Self::with_runtime(config)
    }

    /// Builds an array from `(key, value)` options.
    ///
    /// # Errors
    /// See [`ArrayConfig::from_options`]. No array is produced on error.
    pub fn with_options<I, K>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        ArrayConfig::from_options(options).map(Self::with_config)
    }

    /// Builds an array and registers every sensor in `sensors`.
    ///
    /// Entries that cannot be registered are reported and skipped; the batch is never
    /// aborted.
    pub fn from_sensors<I>(config: ArrayConfig, sensors: I) -> Self
    where
        I: IntoIterator<Item = SharedSensor>,
    {
        let array = Self::with_config(config);
        let skipped = array.add_all(sensors);
        if !skipped.is_empty() {
            crate::warn!("sensor array: skipped {} of the supplied sensors", skipped.len());
        }
        array
    }
}

impl Default for SensorArray<DefaultRuntime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> SensorArray<R> {
    /// An empty array scheduled by the default timer and frame clock of `R`.
    pub fn with_runtime(config: ArrayConfig) -> Self {
        Self::with_scheduler(config, R::Timer::default(), R::FrameClock::default())
    }

    /// An empty array scheduled by the given timer and frame clock.
    pub fn with_scheduler(config: ArrayConfig, timer: R::Timer, frame_clock: R::FrameClock) -> Self {
        Self {
            shared: Arc::new(Shared {
                sensors: Mutex::new(Vec::new()),
                config: Mutex::new(config),
                streaming: StreamingState::new(),
                cumulative: SharedState::new(),
                merge_policy: MergePolicy::LastWins,
                timer,
                frame_clock,
            }),
        }
    }

    /// Registers `sensor` unless this very instance is already registered.
    ///
    /// On success the sensor's timestamp flag is set to the array's.
    pub fn add<S: Sensor>(&self, sensor: Arc<S>) -> Registration {
        self.add_shared(sensor)
    }

    /// Like [`add`](SensorArray::add), for an already type-erased sensor.
    pub fn add_shared(&self, sensor: SharedSensor) -> Registration {
        match self.try_add_shared(sensor) {
            Ok(()) => Registration::Added,
            Err(warning) => {
                crate::warn!("sensor array: {warning}");
                Registration::AlreadyRegistered
            }
        }
    }

    /// Strict registration: a duplicate is returned as an error instead of logged.
    ///
    /// # Errors
    /// [`SensorArrayError::Registration`] if the sensor is already registered.
    pub fn try_add<S: Sensor>(&self, sensor: Arc<S>) -> Result<()> {
        self.try_add_shared(sensor).map_err(SensorArrayError::from)
    }

    // Sensor methods are only called with the sensor lock released.
    fn try_add_shared(&self, sensor: SharedSensor) -> core::result::Result<(), RegistrationWarning> {
        let added = {
            let mut sensors = self.shared.sensors.lock();
            let duplicate = sensors.iter().any(|s| address(s) == address(&sensor));
            if !duplicate {
                sensors.push(Arc::clone(&sensor));
            }
            !duplicate
        };

        if !added {
            return Err(RegistrationWarning::AlreadyRegistered {
                sensor: sensor.name().to_string(),
            });
        }
        sensor.set_timestamp(self.timestamp());
        crate::debug!("sensor array: registered `{}`", sensor.name());
        Ok(())
    }

    /// Registers each sensor independently and returns the diagnostics for those that
    /// were skipped.
    pub fn add_all<I>(&self, sensors: I) -> Vec<RegistrationWarning>
    where
        I: IntoIterator<Item = SharedSensor>,
    {
        sensors
            .into_iter()
            .filter_map(|sensor| self.try_add_shared(sensor).err())
            .inspect(|warning| crate::warn!("sensor array: {warning}"))
            .collect()
    }

    /// Unregisters `sensor` by identity. Returns `false` if it was not registered.
    ///
    /// The sensor itself is left untouched.
    pub fn remove<T: ?Sized>(&self, sensor: &Arc<T>) -> bool {
        let mut sensors = self.shared.sensors.lock();
        let index = sensors.iter().position(|s| address(s) == address(sensor));
        let removed = index.map(|index| sensors.remove(index));
        drop(sensors);
        removed.is_some()
    }

    pub fn contains<T: ?Sized>(&self, sensor: &Arc<T>) -> bool {
        self.shared
            .sensors
            .lock()
            .iter()
            .any(|s| address(s) == address(sensor))
    }

    pub fn len(&self) -> usize {
        self.shared.sensors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.sensors.lock().is_empty()
    }

    /// The registered sensors, in registration order.
    pub fn sensors(&self) -> Vec<SharedSensor> {
        self.shared.sensors.lock().clone()
    }

    /// Enters `Streaming`. Consuming a stream does this implicitly.
    pub fn start(&self) {
        if self.shared.streaming.start() {
            crate::debug!("sensor array: streaming");
        }
    }

    /// Returns to `Idle`. Every stream of this array ends once its current pause is over.
    pub fn stop(&self) {
        if self.shared.streaming.stop() {
            crate::debug!("sensor array: idle");
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.streaming.lifecycle()
    }

    pub fn is_streaming(&self) -> bool {
        self.shared.streaming.is_streaming()
    }

    /// The lifecycle flag shared by every stream of this array.
    pub fn streaming_state(&self) -> StreamingState {
        self.shared.streaming.clone()
    }

    pub fn config(&self) -> ArrayConfig {
        *self.shared.config.lock()
    }

    pub fn delay(&self) -> Delay {
        self.shared.config.lock().delay
    }

    /// Replaces the pause between cycles. Takes effect at the next pause.
    ///
    /// ```
    /// use sensor_array::{Delay, SensorArray};
    ///
    /// let array = SensorArray::new();
    /// array.set_delay("requestAnimationFrame")?;
    /// assert_eq!(array.delay(), Delay::FrameSync);
    ///
    /// assert!(array.set_delay(-5).is_err());
    /// assert_eq!(array.delay(), Delay::FrameSync);
    /// # Ok::<(), sensor_array::SensorArrayError>(())
    /// ```
    ///
    /// # Errors
    /// [`SensorArrayError::Validation`] if `delay` is not acceptable; the stored delay
    /// is unchanged.
    pub fn set_delay<V>(&self, delay: V) -> Result<()>
    where
        V: TryInto<Delay>,
        SensorArrayError: From<V::Error>,
    {
        let delay = delay.try_into()?;
        self.shared.config.lock().delay = delay;
        Ok(())
    }

    pub fn accumulate(&self) -> bool {
        self.shared.config.lock().accumulate
    }

    /// Switches between per-cycle snapshots and the cumulative fold.
    ///
    /// The cumulative state is kept; see [`reset_cumulative_state`](SensorArray::reset_cumulative_state).
    pub fn set_accumulate(&self, accumulate: bool) {
        self.shared.config.lock().accumulate = accumulate;
    }

    pub fn timestamp(&self) -> bool {
        self.shared.config.lock().timestamp
    }

    /// Changes timestamping and mirrors the flag onto every registered sensor.
    pub fn set_timestamp(&self, timestamp: bool) {
        self.shared.config.lock().timestamp = timestamp;
        for sensor in self.sensors() {
            sensor.set_timestamp(timestamp);
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.shared.merge_policy
    }

    /// A copy of the cumulative state.
    pub fn cumulative_state(&self) -> NamedState {
        self.shared.cumulative.snapshot()
    }

    /// The live cumulative state, as handed out by accumulating streams.
    pub fn shared_state(&self) -> SharedState {
        self.shared.cumulative.clone()
    }

    pub fn reset_cumulative_state(&self) {
        *self.shared.cumulative.lock() = NamedState::new();
    }

    /// A new snapshot sequence over this array.
    ///
    /// The sequence enters `Streaming` on its first poll and ends after the array
    /// returns to `Idle`, or right after yielding a sensor failure.
    pub fn stream(&self) -> SnapshotStream {
        snapshot_stream(Arc::clone(&self.shared))
    }
}

impl<'a, R: Runtime> IntoStream for &'a SensorArray<R> {
    type Item = StreamItem<Snapshot>;
    type Stream = SnapshotStream;

    fn into_stream(self) -> Self::Stream {
        self.stream()
    }
}
