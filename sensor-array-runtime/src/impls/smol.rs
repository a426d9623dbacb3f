// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-smol")]
use std::time::{Duration, Instant};

#[cfg(feature = "runtime-smol")]
use crate::{
    frame_clock::{frame_period, until_next_frame, FrameClock},
    runtime::Runtime,
    timer::Timer,
    DEFAULT_FRAME_RATE,
};

#[cfg(feature = "runtime-smol")]
#[derive(Debug)]
pub struct SmolRuntime;

#[cfg(feature = "runtime-smol")]
impl Runtime for SmolRuntime {
    type Timer = SmolTimer;
    type FrameClock = SmolFrameClock;
}

#[cfg(feature = "runtime-smol")]
#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

#[cfg(feature = "runtime-smol")]
pub struct SmolSleep {
    timer: async_io::Timer,
}

#[cfg(feature = "runtime-smol")]
impl SmolSleep {
    fn after(duration: Duration) -> Self {
        Self {
            timer: async_io::Timer::after(duration),
        }
    }

    fn at(deadline: Instant) -> Self {
        Self {
            timer: async_io::Timer::at(deadline),
        }
    }
}

#[cfg(feature = "runtime-smol")]
impl core::future::Future for SmolSleep {
    type Output = ();

    fn poll(
        mut self: core::pin::Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Self::Output> {
        core::pin::Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}

#[cfg(feature = "runtime-smol")]
impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        SmolSleep::after(duration)
    }
}

/// Frame clock ticking on a fixed grid anchored at its creation instant.
#[cfg(feature = "runtime-smol")]
#[derive(Clone, Debug)]
pub struct SmolFrameClock {
    origin: Instant,
    period: Duration,
}

#[cfg(feature = "runtime-smol")]
impl SmolFrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            origin: Instant::now(),
            period: frame_period(frame_rate),
        }
    }
}

#[cfg(feature = "runtime-smol")]
impl Default for SmolFrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(feature = "runtime-smol")]
impl FrameClock for SmolFrameClock {
    type Frame = SmolSleep;

    fn next_frame(&self) -> Self::Frame {
        let now = Instant::now();
        let wait = until_next_frame(now.duration_since(self.origin), self.period);
        SmolSleep::at(now + wait)
    }
}
