// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use event_listener::Event;
use futures::future::BoxFuture;
use futures::FutureExt;
use sensor_array_runtime::frame_clock::FrameClock;
use sensor_array_runtime::impls::tokio::TokioTimer;
use sensor_array_runtime::runtime::Runtime;

#[derive(Debug, Default)]
struct Frames {
    rendered: AtomicU64,
    rendered_event: Event,
}

/// A frame clock that only ticks when the test calls [`render`](ManualFrameClock::render).
///
/// A frame future resolves once a frame is rendered after the future was created.
/// Clones share the same frame counter.
#[derive(Clone, Debug, Default)]
pub struct ManualFrameClock {
    frames: Arc<Frames>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame, releasing every pending frame future.
    pub fn render(&self) {
        self.frames.rendered.fetch_add(1, Ordering::SeqCst);
        self.frames.rendered_event.notify(usize::MAX);
    }

    /// Number of frames rendered so far.
    pub fn rendered(&self) -> u64 {
        self.frames.rendered.load(Ordering::SeqCst)
    }
}

impl FrameClock for ManualFrameClock {
    type Frame = BoxFuture<'static, ()>;

    fn next_frame(&self) -> Self::Frame {
        let frames = Arc::clone(&self.frames);
        let requested_at = frames.rendered.load(Ordering::SeqCst);
        async move {
            loop {
                if frames.rendered.load(Ordering::SeqCst) != requested_at {
                    return;
                }
                let listener = frames.rendered_event.listen();
                if frames.rendered.load(Ordering::SeqCst) != requested_at {
                    return;
                }
                listener.await;
            }
        }
        .boxed()
    }
}

/// Tokio timers with a [`ManualFrameClock`].
///
/// Build the array with `SensorArray::<ManualRuntime>::with_scheduler` and keep a clone
/// of the clock to render frames.
#[derive(Debug)]
pub struct ManualRuntime;

impl Runtime for ManualRuntime {
    type Timer = TokioTimer;
    type FrameClock = ManualFrameClock;
}
