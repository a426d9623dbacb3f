// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::Debug;
use std::time::Duration;

use futures::stream::StreamExt;
use futures::Stream;
use sensor_array_core::StreamItem;
use tokio::time::sleep;

/// Asserts that `stream` produces nothing within `timeout_ms` (tokio time).
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected element emitted, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Awaits the next item and unwraps it into a value.
///
/// # Panics
/// If the stream ended or yielded an error.
pub async fn unwrap_stream<S, T>(stream: &mut S) -> T
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match stream.next().await {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(err)) => panic!("expected a value, stream yielded error: {err}"),
        None => panic!("expected a value, stream ended"),
    }
}

/// Awaits the next item and unwraps it into an error.
///
/// # Panics
/// If the stream ended or yielded a value.
pub async fn unwrap_error<S, T>(stream: &mut S) -> sensor_array_error::SensorArrayError
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match stream.next().await {
        Some(StreamItem::Error(err)) => err,
        Some(StreamItem::Value(_)) => panic!("expected an error, stream yielded a value"),
        None => panic!("expected an error, stream ended"),
    }
}

/// Asserts that `stream` has ended within `timeout_ms` (tokio time).
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "expected end of stream, got {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("stream still open after {timeout_ms} ms");
        }
    }
}
