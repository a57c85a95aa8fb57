//! No-flat decorator: suppresses trading while the market moves sideways.
//!
//! Flatness is the closing-price range over a sliding window, relative to
//! the window mean, in percent: `(max - min) / mean * 100`. Below the
//! threshold the market counts as flat and the decorator emits Hold.
//!
//! The window holds exactly `period` closings. Until it fills up the market
//! is treated as not flat and the inner action passes through.

use std::collections::VecDeque;
use std::sync::Arc;

use chartflow_core::asset::{snapshots_as_closings, Snapshot};
use chartflow_core::helper::{duplicate, map, operate, Stream};
use chartflow_core::report::{Report, ReportColumn};

use crate::action::Action;
use crate::strategy::{begin_report, finish_report, Strategy};

/// Flatness of a window in percent.
///
/// Returns NaN for an empty window or a zero mean.
pub fn flatness(window: &[f64]) -> f64 {
    let Some(&first) = window.first() else {
        return f64::NAN;
    };

    let (mut min, mut max, mut total) = (first, first, 0.0);
    for &price in window {
        min = min.min(price);
        max = max.max(price);
        total += price;
    }

    let mean = total / window.len() as f64;
    if mean == 0.0 {
        return f64::NAN;
    }
    (max - min) / mean * 100.0
}

/// Sliding window of the most recent `period` closings.
struct FlatnessWindow {
    period: usize,
    closings: VecDeque<f64>,
}

impl FlatnessWindow {
    fn new(period: usize) -> Self {
        Self {
            period,
            closings: VecDeque::with_capacity(period + 1),
        }
    }

    /// Adds a closing and returns the measure once the window is full.
    fn push(&mut self, closing: f64) -> Option<f64> {
        self.closings.push_back(closing);
        if self.closings.len() > self.period {
            self.closings.pop_front();
        }
        if self.closings.len() < self.period {
            return None;
        }
        Some(flatness(self.closings.make_contiguous()))
    }
}

/// Emits Hold whenever the recent closings are flat, otherwise passes the
/// inner strategy's action through.
#[derive(Clone)]
pub struct NoFlatStrategy {
    inner: Arc<dyn Strategy>,
    period: usize,
    threshold: f64,
}

impl NoFlatStrategy {
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize, threshold: f64, inner: Arc<dyn Strategy>) -> Self {
        assert!(period >= 1, "no-flat period must be >= 1");
        Self {
            inner,
            period,
            threshold,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn inner(&self) -> &Arc<dyn Strategy> {
        &self.inner
    }

    /// Flatness per snapshot, 0 while the window is warming up.
    pub fn flatness_measures(&self, snapshots: Stream<Snapshot>) -> Stream<f64> {
        let mut window = FlatnessWindow::new(self.period);
        map(snapshots_as_closings(snapshots), move |closing| {
            window.push(closing).unwrap_or(0.0)
        })
    }
}

impl Strategy for NoFlatStrategy {
    fn name(&self) -> String {
        format!("NoFlat({},{:.0},{})", self.period, self.threshold, self.inner.name())
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let mut snapshots = duplicate(snapshots, 2);
        let closings = snapshots_as_closings(snapshots.remove(1));
        let actions = self.inner.compute(snapshots.remove(0));

        let threshold = self.threshold;
        let mut window = FlatnessWindow::new(self.period);
        operate(actions, closings, move |action, closing| match window.push(closing) {
            // NaN compares false, so an undefined measure is never flat.
            Some(measure) if measure < threshold => Action::Hold,
            _ => action,
        })
    }

    fn report(&self, snapshots: Stream<Snapshot>) -> Report {
        let (mut report, outcomes, mut extras) = begin_report(self, snapshots, 1);
        report.add_column(ReportColumn::numeric(
            "Flatness",
            self.flatness_measures(extras.remove(0)),
        ));
        finish_report(report, outcomes)
    }
}
