// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
use crate::{
    frame_clock::{frame_period, until_next_frame, FrameClock},
    runtime::Runtime,
    timer::Timer,
    DEFAULT_FRAME_RATE,
};

#[cfg(feature = "runtime-tokio")]
pub struct TokioRuntime;

#[cfg(feature = "runtime-tokio")]
impl Runtime for TokioRuntime {
    type Timer = TokioTimer;
    type FrameClock = TokioFrameClock;
}

#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "runtime-tokio")]
impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }
}

/// Frame clock ticking on a fixed grid anchored at its creation instant.
///
/// Tokio has no display to synchronise with, so frames are simulated at a fixed rate.
/// Clones share the same grid.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug)]
pub struct TokioFrameClock {
    origin: tokio::time::Instant,
    period: Duration,
}

#[cfg(feature = "runtime-tokio")]
impl TokioFrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            origin: tokio::time::Instant::now(),
            period: frame_period(frame_rate),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(feature = "runtime-tokio")]
impl Default for TokioFrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(feature = "runtime-tokio")]
impl FrameClock for TokioFrameClock {
    type Frame = tokio::time::Sleep;

    fn next_frame(&self) -> Self::Frame {
        let now = tokio::time::Instant::now();
        let wait = until_next_frame(now.duration_since(self.origin), self.period);
        tokio::time::sleep_until(now + wait)
    }
}
