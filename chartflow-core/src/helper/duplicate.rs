//! Fan-out: one input stream, many independently consumed copies.

use std::sync::mpsc::{self, Sender};

use super::stream::{spawn_stage, Stream};

/// Duplicates `input` into `count` streams that each receive every element
/// in the same order.
///
/// Every output has its own unbounded queue, so a fast consumer never waits
/// on a slow sibling. The input is read exactly once per element. Outputs
/// close after delivering everything once the input closes. An output whose
/// consumer went away is skipped; the stage stops when all of them are gone.
///
/// # Panics
/// Panics if `count` is zero.
pub fn duplicate<T>(input: Stream<T>, count: usize) -> Vec<Stream<T>>
where
    T: Clone + Send + 'static,
{
    assert!(count >= 1, "duplicate count must be >= 1");

    let (senders, outputs): (Vec<Sender<T>>, Vec<Stream<T>>) = (0..count)
        .map(|_| {
            let (tx, rx) = mpsc::channel();
            (tx, Stream::from(rx))
        })
        .unzip();

    spawn_stage("duplicate", move || {
        let mut senders: Vec<Option<Sender<T>>> = senders.into_iter().map(Some).collect();

        for value in input {
            let mut alive = 0;
            for slot in senders.iter_mut() {
                if let Some(tx) = slot {
                    if tx.send(value.clone()).is_ok() {
                        alive += 1;
                    } else {
                        *slot = None;
                    }
                }
            }
            if alive == 0 {
                break;
            }
        }
    });

    outputs
}
