//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + multiplier * stddev(close, period)
//! - Lower: middle - multiplier * stddev(close, period)
//!
//! Uses population stddev (divide by N). Idle period: period - 1.

use crate::helper::{add, duplicate, multiply_by, subtract, Stream};

use super::{Indicator, MovingStd, Sma};

/// The three band streams, index-aligned with each other.
#[derive(Debug)]
pub struct BollingerBandsOutput {
    pub upper: Stream<f64>,
    pub middle: Stream<f64>,
    pub lower: Stream<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    pub const DEFAULT_PERIOD: usize = 20;
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(multiplier >= 0.0, "Bollinger multiplier must be >= 0");
        Self { period, multiplier }
    }

    pub fn with_period(period: usize) -> Self {
        Self::new(period, Self::DEFAULT_MULTIPLIER)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD, Self::DEFAULT_MULTIPLIER)
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerBandsOutput;

    fn idle_period(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, values: Stream<f64>) -> BollingerBandsOutput {
        let mut values = duplicate(values, 2);
        let means = Sma::new(self.period).compute(values.remove(0));
        let deviations = MovingStd::new(self.period).compute(values.remove(0));

        let mut means = duplicate(means, 3);
        let mut offsets = duplicate(multiply_by(deviations, self.multiplier), 2);

        let middle = means.remove(2);
        let lower = subtract(means.remove(1), offsets.remove(1));
        let upper = add(means.remove(0), offsets.remove(0));

        BollingerBandsOutput {
            upper,
            middle,
            lower,
        }
    }
}
