//! Synchronous zip of index-aligned streams.

use super::stream::{rendezvous, spawn_stage, Stream};

/// Combines two aligned streams element by element.
///
/// Reads one element from each input per step and emits `f(a, b)`. Stops as
/// soon as either input closes; an element already read from the other
/// input for that final step is discarded. The output length is therefore
/// `min(len(a), len(b))`.
pub fn operate<A, B, R, F>(a: Stream<A>, b: Stream<B>, mut f: F) -> Stream<R>
where
    A: Send + 'static,
    B: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B) -> R + Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("operate", move || loop {
        let Some(x) = a.recv() else { break };
        let Some(y) = b.recv() else { break };
        if tx.send(f(x, y)).is_err() {
            break;
        }
    });
    output
}

/// Combines three aligned streams element by element.
///
/// Same contract as [`operate`], over three inputs.
pub fn operate3<A, B, C, R, F>(a: Stream<A>, b: Stream<B>, c: Stream<C>, mut f: F) -> Stream<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B, C) -> R + Send + 'static,
{
    let (tx, output) = rendezvous();
    spawn_stage("operate3", move || loop {
        let Some(x) = a.recv() else { break };
        let Some(y) = b.recv() else { break };
        let Some(z) = c.recv() else { break };
        if tx.send(f(x, y, z)).is_err() {
            break;
        }
    });
    output
}
