//! Moving population standard deviation.

use std::collections::VecDeque;

use crate::helper::{rendezvous, spawn_stage, Stream};

use super::Indicator;

/// Population standard deviation (divide by N) over a rolling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingStd {
    period: usize,
}

impl MovingStd {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MovingStd period must be >= 1");
        Self { period }
    }
}

impl Indicator for MovingStd {
    type Output = Stream<f64>;

    fn idle_period(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, values: Stream<f64>) -> Stream<f64> {
        let period = self.period;
        let (tx, output) = rendezvous();
        spawn_stage("moving_std", move || {
            let mut window = VecDeque::with_capacity(period + 1);
            for value in values {
                window.push_back(value);
                if window.len() > period {
                    window.pop_front();
                }
                if window.len() < period {
                    continue;
                }

                let mean = window.iter().sum::<f64>() / period as f64;
                let variance = window
                    .iter()
                    .map(|v| {
                        let diff = v - mean;
                        diff * diff
                    })
                    .sum::<f64>()
                    / period as f64;

                if tx.send(variance.sqrt()).is_err() {
                    break;
                }
            }
        });
        output
    }
}
