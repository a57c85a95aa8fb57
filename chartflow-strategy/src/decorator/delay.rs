//! Delay decorator: silences the inner strategy during a warm-up period.

use std::sync::Arc;

use chartflow_core::asset::{snapshots_as_closings, Snapshot};
use chartflow_core::helper::{duplicate, operate, Stream};

use crate::action::Action;
use crate::strategy::Strategy;

/// Emits Hold for the first `period` positions, then the inner actions.
#[derive(Clone)]
pub struct DelayStrategy {
    inner: Arc<dyn Strategy>,
    period: usize,
}

impl DelayStrategy {
    pub fn new(period: usize, inner: Arc<dyn Strategy>) -> Self {
        Self { inner, period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn inner(&self) -> &Arc<dyn Strategy> {
        &self.inner
    }
}

impl Strategy for DelayStrategy {
    fn name(&self) -> String {
        format!("D({},{})", self.period, self.inner.name())
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let mut snapshots = duplicate(snapshots, 2);
        // Closings only pace the counter in lockstep with the inner actions.
        let closings = snapshots_as_closings(snapshots.remove(1));
        let actions = self.inner.compute(snapshots.remove(0));

        let period = self.period;
        let mut seen = 0usize;
        operate(actions, closings, move |action, _closing| {
            seen += 1;
            if seen <= period {
                Action::Hold
            } else {
                action
            }
        })
    }
}
