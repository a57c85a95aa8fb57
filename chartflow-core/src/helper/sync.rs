//! Consumption helpers: draining, buffering and completion signalling.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use super::stream::{rendezvous, spawn_stage, Stream};

/// Consumes and discards every remaining element until `input` closes.
pub fn drain<T>(input: Stream<T>) {
    input.for_each(drop);
}

/// Drains `input` on a worker thread so its producer is never left blocked.
///
/// Used for indicator outputs a caller does not need.
pub fn drain_in_background<T>(input: Stream<T>)
where
    T: Send + 'static,
{
    spawn_stage("drain", move || drain(input));
}

/// Decouples producer and consumer by up to `capacity` elements of slack.
///
/// The stage holds one element while waiting to enqueue it, so the queue
/// itself is one shorter. A capacity of 0 behaves like an ordinary stage.
pub fn buffered<T>(input: Stream<T>, capacity: usize) -> Stream<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(capacity.saturating_sub(1));
    spawn_stage("buffered", move || {
        for value in input {
            if tx.send(value).is_err() {
                break;
            }
        }
    });
    Stream::from(rx)
}

/// Counter that lets one thread wait for a set of streams to be consumed.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct WaitGroup {
    inner: Arc<(Mutex<usize>, Condvar)>,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `n` more pending streams.
    pub fn add(&self, n: usize) {
        let (pending, _) = &*self.inner;
        *pending.lock().unwrap_or_else(PoisonError::into_inner) += n;
    }

    /// Marks one pending stream as finished.
    pub fn done(&self) {
        let (pending, finished) = &*self.inner;
        let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            finished.notify_all();
        }
    }

    /// Blocks until every registered stream has finished.
    pub fn wait(&self) {
        let (pending, finished) = &*self.inner;
        let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
        while *pending > 0 {
            pending = finished
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Passes `input` through unchanged and marks `group` done once `input` has
/// been read to the end.
///
/// If the consumer of the returned stream goes away early, the remaining
/// input is still drained before the group is notified.
pub fn waitable<T>(group: &WaitGroup, input: Stream<T>) -> Stream<T>
where
    T: Send + 'static,
{
    group.add(1);
    let group = group.clone();
    let (tx, output) = rendezvous();
    spawn_stage("waitable", move || {
        while let Some(value) = input.recv() {
            if tx.send(value).is_err() {
                break;
            }
        }
        drop(tx);
        drain(input);
        group.done();
    });
    output
}
