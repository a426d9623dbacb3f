// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scheduling primitives for the sensor-array merge loop.
//!
//! The loop pauses between cycles using one of two host-provided services:
//!
//! - a [`Timer`](timer::Timer), which resumes after a fixed duration;
//! - a [`FrameClock`](frame_clock::FrameClock), which resumes at the host's next
//!   rendering opportunity.
//!
//! A [`Runtime`](runtime::Runtime) bundles both. Enable the implementation that matches
//! your executor:
//!
//! - `runtime-tokio` (default): [`TokioRuntime`](impls::tokio::TokioRuntime)
//! - `runtime-smol`: [`SmolRuntime`](impls::smol::SmolRuntime)
//! - `runtime-wasm`: [`WasmRuntime`](impls::wasm::WasmRuntime), frames follow
//!   `requestAnimationFrame`

pub mod frame_clock;
pub mod impls;
pub mod runtime;
pub mod timer;
mod yield_now;

pub use yield_now::yield_now;

/// Default frame rate of the frame clocks that are not driven by a real display.
pub const DEFAULT_FRAME_RATE: u32 = 60;
