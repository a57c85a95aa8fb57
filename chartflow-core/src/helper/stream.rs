//! The stream handle and the generic element-wise stages.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use tracing::trace;

/// An ordered, possibly infinite, single-pass sequence of `T`.
///
/// Exactly one consumer owns a stream. Fan-out is only possible through
/// [`duplicate`](super::duplicate). The stream closes once every producer
/// has dropped its sending side.
#[derive(Debug)]
pub struct Stream<T> {
    rx: Receiver<T>,
}

impl<T> Stream<T> {
    /// Blocks until the next element arrives. `None` means the stream is closed.
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }
}

impl<T> From<Receiver<T>> for Stream<T> {
    fn from(rx: Receiver<T>) -> Self {
        Self { rx }
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.recv()
    }
}

/// Creates a zero-capacity channel: every send waits for the matching receive.
pub(crate) fn rendezvous<T>() -> (SyncSender<T>, Stream<T>) {
    let (tx, rx) = mpsc::sync_channel(0);
    (tx, Stream::from(rx))
}

/// Runs one pipeline stage on its own named worker thread.
pub(crate) fn spawn_stage<F>(stage: &'static str, body: F)
where
    F: FnOnce() + Send + 'static,
{
    trace!(stage, "spawning stage");
    thread::Builder::new()
        .name(format!("chartflow-{stage}"))
        .spawn(move || {
            body();
            trace!(stage, "stage finished");
        })
        .expect("failed to spawn pipeline stage thread");
}

/// Streams every item of `items` in order, then closes.
pub fn from_iter<I>(items: I) -> Stream<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    let items = items.into_iter();
    let (tx, output) = rendezvous();
    spawn_stage("source", move || {
        for item in items {
            if tx.send(item).is_err() {
                break;
            }
        }
    });
    output
}

/// Streams the elements of a vector in order, then closes.
pub fn from_vec<T>(values: Vec<T>) -> Stream<T>
where
    T: Send + 'static,
{
    from_iter(values)
}

/// Collects every remaining element until the stream closes.
pub fn to_vec<T>(stream: Stream<T>) -> Vec<T> {
    stream.collect()
}

/// Applies `f` to every element.
pub fn map<T, R, F>(input: Stream<T>, mut f: F) -> Stream<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> R + Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("map", move || {
        for value in input {
            if tx.send(f(value)).is_err() {
                break;
            }
        }
    });
    output
}

/// Passes through only the elements for which `predicate` holds.
///
/// This is the one generic stage that changes the stream length; aligned
/// pipelines should prefer `skip` and `shift`.
pub fn filter<T, F>(input: Stream<T>, mut predicate: F) -> Stream<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("filter", move || {
        for value in input {
            if predicate(&value) && tx.send(value).is_err() {
                break;
            }
        }
    });
    output
}
