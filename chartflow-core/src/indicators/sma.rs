//! Simple Moving Average (SMA).

use std::collections::VecDeque;

use crate::helper::{rendezvous, spawn_stage, Stream};

use super::Indicator;

/// Arithmetic mean over a rolling window of `period` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = Stream<f64>;

    fn idle_period(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, values: Stream<f64>) -> Stream<f64> {
        let period = self.period;
        let (tx, output) = rendezvous();
        spawn_stage("sma", move || {
            let mut window = VecDeque::with_capacity(period + 1);
            let mut sum = 0.0;
            for value in values {
                window.push_back(value);
                sum += value;

                if window.len() > period {
                    if let Some(oldest) = window.pop_front() {
                        sum -= oldest;
                    }
                }

                if window.len() == period && tx.send(sum / period as f64).is_err() {
                    break;
                }
            }
        });
        output
    }
}
