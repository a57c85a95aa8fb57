//! Majority group: follows whichever action most members agree on.

use std::sync::Arc;

use chartflow_core::asset::Snapshot;
use chartflow_core::helper::{from_iter, Stream};
use tracing::debug;

use crate::action::Action;
use crate::strategy::{action_sources, count_actions, Strategy};

/// Emits the action with a strict plurality among the members; ties hold.
#[derive(Clone)]
pub struct MajorityStrategy {
    strategies: Vec<Arc<dyn Strategy>>,
    name: String,
}

impl MajorityStrategy {
    /// # Panics
    /// Panics if `strategies` is empty.
    pub fn new(name: impl Into<String>, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        assert!(!strategies.is_empty(), "majority strategy needs at least one member");
        let name = name.into();
        let name = if name.is_empty() {
            let names: Vec<String> = strategies.iter().map(|s| s.name()).collect();
            format!("MAJORITY({})", names.join(","))
        } else {
            name
        };
        Self { strategies, name }
    }

    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }
}

impl Strategy for MajorityStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        debug!(strategy = %self.name, members = self.strategies.len(), "starting majority pipeline");
        let sources = action_sources(&self.strategies, snapshots);

        from_iter(std::iter::from_fn(move || {
            let counts = count_actions(&sources)?;
            Some(if counts.buy > counts.hold && counts.buy > counts.sell {
                Action::Buy
            } else if counts.sell > counts.buy && counts.sell > counts.hold {
                Action::Sell
            } else {
                Action::Hold
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action::{Buy, Hold, Sell};
    use crate::test_support::{snapshots, Canned};
    use chartflow_core::helper::to_vec;

    fn canned(name: &str, actions: Vec<Action>) -> Arc<dyn Strategy> {
        Arc::new(Canned::new(name, actions))
    }

    #[test]
    fn follows_the_majority() {
        let majority = MajorityStrategy::new(
            "",
            vec![
                canned("a", vec![Buy, Sell, Buy, Hold]),
                canned("b", vec![Buy, Sell, Sell, Hold]),
                canned("c", vec![Sell, Hold, Hold, Buy]),
            ],
        );
        let actions = to_vec(majority.compute(snapshots(4)));
        assert_eq!(actions, vec![Buy, Sell, Hold, Hold]);
    }

    #[test]
    fn ties_hold() {
        let majority = MajorityStrategy::new(
            "tie",
            vec![canned("a", vec![Buy, Sell]), canned("b", vec![Sell, Hold])],
        );
        assert_eq!(to_vec(majority.compute(snapshots(2))), vec![Hold, Hold]);
    }

    #[test]
    fn default_name_lists_members() {
        let majority = MajorityStrategy::new("", vec![canned("a", vec![]), canned("b", vec![])]);
        assert_eq!(majority.name(), "MAJORITY(a,b)");
    }
}
