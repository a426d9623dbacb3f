// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::time::Duration;

/// A source of "next frame" signals.
///
/// Every call to [`next_frame`](FrameClock::next_frame) returns a future that resolves at
/// the next rendering opportunity after the call. Callers waiting on the same clock are
/// released by the same frame.
pub trait FrameClock: Clone + Send + Sync + Debug + 'static {
    type Frame: Future<Output = ()> + Send;

    fn next_frame(&self) -> Self::Frame;
}

/// Time from `elapsed` until the next multiple of `period`.
///
/// A caller sitting exactly on a frame boundary waits a full period, so a loop that
/// awaits consecutive frames never sees the same frame twice.
pub fn until_next_frame(elapsed: Duration, period: Duration) -> Duration {
    let period_nanos = period.as_nanos().max(1);
    let into_frame = elapsed.as_nanos() % period_nanos;
    let remaining = period_nanos - into_frame;
    Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX))
}

/// Frame period for `frame_rate` frames per second.
pub fn frame_period(frame_rate: u32) -> Duration {
    Duration::from_secs(1) / frame_rate.max(1)
}
