//! Stream primitives.
//!
//! A [`Stream`] is an ordered, single-pass, single-consumer sequence. Each
//! primitive in this module consumes its input streams by value, spawns one
//! worker thread and hands back its output stream(s) immediately.
//!
//! Ordinary stage outputs are rendezvous channels: a stage blocks until its
//! consumer takes the element. [`duplicate`] and [`buffered`] are the only
//! primitives that introduce slack.
//!
//! Closing is signalled by dropping the sending side. When a consumer drops
//! its stream early, the producing stage notices the failed send and stops.

mod arithmetic;
mod check;
mod duplicate;
mod operate;
mod shift;
mod stream;
mod sync;

pub use arithmetic::{add, change, count, decrement_by, divide, multiply_by, sqrt, subtract};
pub use check::{check_equals, HelperError};
pub use duplicate::duplicate;
pub use operate::{operate, operate3};
pub use shift::{last, shift, skip};
pub use stream::{filter, from_iter, from_vec, map, to_vec, Stream};
pub use sync::{buffered, drain, drain_in_background, waitable, WaitGroup};

pub(crate) use stream::{rendezvous, spawn_stage};

use num_traits::{Num, NumCast};

/// Numeric element type accepted by the arithmetic primitives.
///
/// Blanket-implemented for every primitive integer and float type.
pub trait Number: Num + NumCast + Copy + PartialOrd + Send + 'static {}

impl<T> Number for T where T: Num + NumCast + Copy + PartialOrd + Send + 'static {}
