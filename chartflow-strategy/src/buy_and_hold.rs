//! Buy-and-hold: buy on the first snapshot, hold afterwards.

use chartflow_core::asset::Snapshot;
use chartflow_core::helper::{count, map, Stream};

use crate::action::Action;
use crate::strategy::Strategy;

/// Buys once at the start and never sells. The usual baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyAndHoldStrategy;

impl BuyAndHoldStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for BuyAndHoldStrategy {
    fn name(&self) -> String {
        "Buy and Hold".into()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        map(count(0usize, snapshots), |index| {
            if index == 0 {
                Action::Buy
            } else {
                Action::Hold
            }
        })
    }
}
