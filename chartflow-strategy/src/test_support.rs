//! Canned strategies and fixtures shared by the unit tests.

use chartflow_core::asset::{snapshots_from_closings, Snapshot};
use chartflow_core::helper::{from_vec, operate, Stream};
use chrono::NaiveDate;

use crate::action::Action;
use crate::strategy::Strategy;

/// Replays a fixed action sequence, one action per snapshot.
pub struct Canned {
    name: String,
    actions: Vec<Action>,
}

impl Canned {
    pub fn new(name: &str, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }
}

impl Strategy for Canned {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        operate(snapshots, from_vec(self.actions.clone()), |_, action| action)
    }
}

/// Snapshots with closings 1, 2, 3, ...
pub fn snapshots(n: usize) -> Stream<Snapshot> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let closings: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    from_vec(snapshots_from_closings(start, &closings))
}
