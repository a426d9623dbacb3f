// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Array-wide streaming lifecycle.
//!
//! Every snapshot sequence derived from one array shares a single [`StreamingState`].
//! The lifecycle is `Idle` → `Streaming` → `Idle`, and may be restarted any number of
//! times:
//!
//! - `start()`, or beginning to consume any sequence, enters `Streaming`;
//! - `stop()` re-enters `Idle` for all sequences at once.
//!
//! Stopping is cooperative. A merge loop only looks at the flag after its current
//! suspension resolves, so one already-in-progress cycle may still complete.
//!
//! # Example
//!
//! ```
//! use sensor_array_core::{Lifecycle, StreamingState};
//!
//! let state = StreamingState::new();
//! let shared = state.clone();
//! assert_eq!(state.lifecycle(), Lifecycle::Idle);
//!
//! shared.start();
//! assert!(state.is_streaming());
//!
//! state.stop();
//! assert_eq!(shared.lifecycle(), Lifecycle::Idle);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The two states of the merge loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No loop produces snapshots.
    Idle,
    /// Loops keep cycling until the state returns to `Idle`.
    Streaming,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Idle => f.write_str("idle"),
            Lifecycle::Streaming => f.write_str("streaming"),
        }
    }
}

/// Shared streaming flag. Cheap to clone; all clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct StreamingState {
    streaming: Arc<AtomicBool>,
}

impl StreamingState {
    /// Creates a new state in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Streaming`. Returns `true` if the state was `Idle` before.
    pub fn start(&self) -> bool {
        !self.streaming.swap(true, Ordering::AcqRel)
    }

    /// Enters `Idle`. Returns `true` if the state was `Streaming` before.
    ///
    /// This never interrupts a pending suspension.
    pub fn stop(&self) -> bool {
        self.streaming.swap(false, Ordering::AcqRel)
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.is_streaming() {
            Lifecycle::Streaming
        } else {
            Lifecycle::Idle
        }
    }

    /// Whether two handles refer to the same underlying flag.
    pub fn same_as(&self, other: &StreamingState) -> bool {
        Arc::ptr_eq(&self.streaming, &other.streaming)
    }
}
