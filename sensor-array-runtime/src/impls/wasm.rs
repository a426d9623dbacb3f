// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-wasm")]
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

#[cfg(feature = "runtime-wasm")]
use futures::channel::oneshot;
#[cfg(feature = "runtime-wasm")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(feature = "runtime-wasm")]
use crate::{frame_clock::FrameClock, runtime::Runtime, timer::Timer};

#[cfg(feature = "runtime-wasm")]
pub struct WasmRuntime;

#[cfg(feature = "runtime-wasm")]
impl Runtime for WasmRuntime {
    type Timer = WasmTimer;
    type FrameClock = WasmFrameClock;
}

/// Resolves when the browser invokes the registered callback.
///
/// If the callback cannot be registered (no `window`, e.g. inside a worker, or the
/// browser refuses the registration) the future resolves on its first poll.
#[cfg(feature = "runtime-wasm")]
#[must_use = "futures do nothing unless awaited"]
pub struct WasmSleep {
    fired: oneshot::Receiver<()>,
}

#[cfg(feature = "runtime-wasm")]
impl WasmSleep {
    /// A sleep whose sender is already gone.
    fn ready() -> Self {
        let (tx, fired) = oneshot::channel::<()>();
        drop(tx);
        Self { fired }
    }
}

#[cfg(feature = "runtime-wasm")]
impl Future for WasmSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.fired).poll(cx).map(|_| ())
    }
}

#[cfg(feature = "runtime-wasm")]
fn schedule<F>(register: F) -> WasmSleep
where
    F: FnOnce(&web_sys::Window, &js_sys::Function) -> Result<i32, wasm_bindgen::JsValue>,
{
    let Some(window) = web_sys::window() else {
        return WasmSleep::ready();
    };

    let (tx, fired) = oneshot::channel();
    let callback = Closure::once_into_js(move || {
        let _ = tx.send(());
    });
    // A rejected registration never runs the callback, so `tx` would never be dropped.
    match register(&window, callback.unchecked_ref()) {
        Ok(_) => WasmSleep { fired },
        Err(_) => WasmSleep::ready(),
    }
}

#[cfg(feature = "runtime-wasm")]
#[derive(Clone, Debug, Default)]
pub struct WasmTimer;

#[cfg(feature = "runtime-wasm")]
impl Timer for WasmTimer {
    type Sleep = WasmSleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        schedule(|window, callback| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, millis)
        })
    }
}

/// Frame clock backed by `requestAnimationFrame`.
#[cfg(feature = "runtime-wasm")]
#[derive(Clone, Debug, Default)]
pub struct WasmFrameClock;

#[cfg(feature = "runtime-wasm")]
impl FrameClock for WasmFrameClock {
    type Frame = WasmSleep;

    fn next_frame(&self) -> Self::Frame {
        schedule(|window, callback| window.request_animation_frame(callback))
    }
}
