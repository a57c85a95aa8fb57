//! Alignment transforms: shift, skip and last.
//!
//! A windowed computation that needs `n` samples before its first output
//! yields a series `n` elements shorter than its source. `skip` drops the
//! same prefix from a companion series so the two can be zipped, and
//! `shift` pads a derived series back to the full source length.

use std::collections::VecDeque;

use super::stream::{rendezvous, spawn_stage, Stream};

/// Emits `count` copies of `fill`, then every element of `input`.
pub fn shift<T>(input: Stream<T>, count: usize, fill: T) -> Stream<T>
where
    T: Clone + Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("shift", move || {
        for _ in 0..count {
            if tx.send(fill.clone()).is_err() {
                return;
            }
        }
        for value in input {
            if tx.send(value).is_err() {
                break;
            }
        }
    });
    output
}

/// Drops the first `count` elements and passes the rest through unchanged.
pub fn skip<T>(input: Stream<T>, count: usize) -> Stream<T>
where
    T: Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("skip", move || {
        for value in input.skip(count) {
            if tx.send(value).is_err() {
                break;
            }
        }
    });
    output
}

/// Emits only the final `count` elements, once `input` has closed.
///
/// A source shorter than `count` is passed through whole, without padding.
pub fn last<T>(input: Stream<T>, count: usize) -> Stream<T>
where
    T: Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("last", move || {
        let mut tail = VecDeque::with_capacity(count);
        for value in input {
            tail.push_back(value);
            if tail.len() > count {
                tail.pop_front();
            }
        }
        for value in tail {
            if tx.send(value).is_err() {
                break;
            }
        }
    });
    output
}
