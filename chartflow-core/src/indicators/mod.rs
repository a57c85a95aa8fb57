//! Indicator capability and the indicators the bundled strategies need.
//!
//! An indicator turns a value stream into one or more derived streams. Its
//! outputs start `idle_period()` elements late: the first output element
//! corresponds to input position `idle_period()`. Callers realign with
//! `helper::skip` on companion streams or `helper::shift` on the outputs.

pub mod bollinger;
pub mod moving_std;
pub mod sma;

pub use bollinger::{BollingerBands, BollingerBandsOutput};
pub use moving_std::MovingStd;
pub use sma::Sma;

use crate::helper::Stream;

/// A streaming indicator over `f64` values.
pub trait Indicator: Send + Sync {
    /// The derived stream(s).
    type Output;

    /// Number of leading input elements consumed before the first output.
    fn idle_period(&self) -> usize;

    /// Starts the indicator pipeline over `values`.
    fn compute(&self, values: Stream<f64>) -> Self::Output;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
