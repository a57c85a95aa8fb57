//! Decorators wrap a single inner strategy and post-process its actions.
//!
//! Each decorator holds its inner strategy behind an `Arc` and implements
//! the full [`Strategy`](crate::Strategy) contract itself, delegating to the
//! inner strategy explicitly.

pub mod delay;
pub mod noflat;

pub use delay::DelayStrategy;
pub use noflat::{flatness, NoFlatStrategy};
