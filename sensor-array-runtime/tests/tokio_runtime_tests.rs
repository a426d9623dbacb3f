// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::task::noop_waker_ref;
use futures::FutureExt;
use sensor_array_runtime::frame_clock::FrameClock;
use sensor_array_runtime::impls::tokio::{TokioFrameClock, TokioTimer};
use sensor_array_runtime::timer::Timer;
use sensor_array_runtime::yield_now;
use tokio::time::{advance, pause, Instant};

const TOLERANCE: Duration = Duration::from_millis(2);

fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual <= expected + TOLERANCE,
        "expected ~{expected:?}, got {actual:?}"
    );
}

#[tokio::test]
async fn test_timer_sleeps_for_duration() {
    // Arrange
    pause();
    let timer = TokioTimer;
    let start = Instant::now();

    // Act
    timer.sleep_future(Duration::from_millis(30)).await;

    // Assert
    assert_close(start.elapsed(), Duration::from_millis(30));
}

#[tokio::test]
async fn test_frame_clock_waits_for_rest_of_frame() {
    // Arrange
    pause();
    let start = Instant::now();
    let clock = TokioFrameClock::new(50);
    advance(Duration::from_millis(5)).await;

    // Act
    clock.next_frame().await;

    // Assert
    assert_close(start.elapsed(), Duration::from_millis(20));
}

#[tokio::test]
async fn test_consecutive_frames_are_one_period_apart() {
    // Arrange
    pause();
    let clock = TokioFrameClock::new(50);
    clock.next_frame().await;
    let first = Instant::now();

    // Act
    clock.next_frame().await;

    // Assert
    let gap = first.elapsed();
    assert!(gap >= Duration::from_millis(18), "gap was {gap:?}");
    assert!(gap <= Duration::from_millis(22), "gap was {gap:?}");
}

#[tokio::test]
async fn test_default_frame_clock_runs_at_sixty_hertz() {
    let clock = TokioFrameClock::default();
    assert_eq!(clock.period(), Duration::from_secs(1) / 60);
}

#[tokio::test]
async fn test_waiters_on_same_clock_share_a_frame() {
    // Arrange
    pause();
    let clock = TokioFrameClock::new(50);
    let other = clock.clone();
    let start = Instant::now();

    // Act
    tokio::join!(clock.next_frame(), other.next_frame());

    // Assert
    assert_close(start.elapsed(), Duration::from_millis(20));
}

#[test]
fn test_yield_now_is_pending_exactly_once() {
    let mut cx = Context::from_waker(noop_waker_ref());
    let mut fut = pin!(yield_now());

    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(()));
}

#[test]
fn test_yield_now_never_completes_on_first_poll() {
    assert!(yield_now().now_or_never().is_none());
}
