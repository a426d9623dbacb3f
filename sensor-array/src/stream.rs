// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The merge loop.
//!
//! One cycle:
//!
//! 1. keep the registered sensors that report data, skipping the rest;
//! 2. in registration order, pop a sample from each and extract its contribution,
//!    stamping the first field with the capture time when timestamping;
//! 3. merge the contributions under the array's [`MergePolicy`](crate::MergePolicy);
//! 4. if anything was merged, stamp the snapshot, fold it into the cumulative state
//!    when accumulating, and yield it;
//! 5. pause for the configured [`Delay`], then loop while the array is streaming.
//!
//! The loop suspends only while popping samples and while pausing. Stopping is
//! observed after the pause, so at most one cycle that was already underway completes.

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use std::sync::Arc;

use async_stream::stream;
use chrono::Utc;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use sensor_array_core::{Contribution, NamedState, SharedSensor, StreamItem};
use sensor_array_error::Result;
use sensor_array_runtime::frame_clock::FrameClock;
use sensor_array_runtime::runtime::Runtime;
use sensor_array_runtime::timer::Timer;
use sensor_array_runtime::yield_now;

use crate::array::Shared;
use crate::delay::Delay;
use crate::snapshot::Snapshot;

/// Lazily evaluated sequence of snapshots produced by a [`SensorArray`](crate::SensorArray).
///
/// Ends when the array returns to `Idle`. A sensor failure is yielded as
/// [`StreamItem::Error`] and ends this sequence only; the array keeps streaming.
#[must_use = "streams do nothing unless polled"]
pub struct SnapshotStream {
    inner: BoxStream<'static, StreamItem<Snapshot>>,
}

impl fmt::Debug for SnapshotStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStream").finish_non_exhaustive()
    }
}

impl Stream for SnapshotStream {
    type Item = StreamItem<Snapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

pub(crate) fn snapshot_stream<R: Runtime>(shared: Arc<Shared<R>>) -> SnapshotStream {
    let inner = stream! {
        if shared.streaming.start() {
            crate::debug!("sensor array: streaming");
        }

        while shared.streaming.is_streaming() {
            match run_cycle(&shared).await {
                Ok(Some(snapshot)) => yield StreamItem::Value(snapshot),
                Ok(None) => {}
                Err(err) => {
                    crate::error!("sensor array: {err}");
                    yield StreamItem::Error(err);
                    return;
                }
            }

            pause(&shared).await;
        }

        crate::debug!("sensor array: stream ended");
    };

    SnapshotStream {
        inner: inner.boxed(),
    }
}

async fn run_cycle<R: Runtime>(shared: &Shared<R>) -> Result<Option<Snapshot>> {
    let registered: Vec<SharedSensor> = shared.sensors.lock().clone();
    let ready: Vec<SharedSensor> = registered
        .into_iter()
        .filter(|sensor| sensor.has_data())
        .collect();
    let config = *shared.config.lock();

    let mut merged = NamedState::new();
    for sensor in &ready {
        let Contribution {
            mut state,
            captured_at,
        } = sensor.next_contribution().await?;

        if config.timestamp && !state.stamp_first_field(captured_at) {
            crate::trace!(
                "sensor array: `{}` has no object field to timestamp",
                sensor.name()
            );
        }
        shared.merge_policy.apply(&mut merged, state);
    }

    if merged.is_empty() {
        return Ok(None);
    }

    if config.timestamp {
        merged.set_timestamp(Utc::now());
    }
    crate::trace!(
        "sensor array: merged {} field(s) from {} sensor(s)",
        merged.len(),
        ready.len()
    );

    if config.accumulate {
        shared.cumulative.lock().merge(merged);
        Ok(Some(Snapshot::Cumulative(shared.cumulative.clone())))
    } else {
        Ok(Some(Snapshot::Cycle(merged)))
    }
}

async fn pause<R: Runtime>(shared: &Shared<R>) {
    let delay = shared.config.lock().delay;
    match delay {
        Delay::Millis(ms) => shared.timer.sleep_future(Duration::from_millis(ms)).await,
        Delay::FrameSync => shared.frame_clock.next_frame().await,
    }
    yield_now().await;
}
