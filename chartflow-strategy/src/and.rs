//! AND group: acts only on unanimous agreement.

use std::sync::Arc;

use chartflow_core::asset::Snapshot;
use chartflow_core::helper::{from_iter, Stream};
use tracing::debug;

use crate::action::Action;
use crate::strategy::{action_sources, count_actions, Strategy};

/// Emits Buy or Sell only when **every** member strategy emits it on the
/// same step, Hold otherwise.
///
/// A conservative combination: recommendations wait for full consensus.
#[derive(Clone)]
pub struct AndStrategy {
    strategies: Vec<Arc<dyn Strategy>>,
    name: String,
}

impl AndStrategy {
    /// Creates a named group.
    ///
    /// # Panics
    /// Panics if `strategies` is empty.
    pub fn new(name: impl Into<String>, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        assert!(!strategies.is_empty(), "AND strategy needs at least one member");
        Self {
            strategies,
            name: name.into(),
        }
    }

    /// Creates a group named `AND(member1,member2,...)`.
    pub fn with(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        let names: Vec<String> = strategies.iter().map(|s| s.name()).collect();
        Self::new(format!("AND({})", names.join(",")), strategies)
    }

    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }
}

impl Strategy for AndStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        debug!(strategy = %self.name, members = self.strategies.len(), "starting AND pipeline");
        let sources = action_sources(&self.strategies, snapshots);
        let members = sources.len();

        from_iter(std::iter::from_fn(move || {
            let counts = count_actions(&sources)?;
            Some(if counts.sell == members {
                Action::Sell
            } else if counts.buy == members {
                Action::Buy
            } else {
                Action::Hold
            })
        }))
    }
}

/// Every unordered pair of distinct strategies, each combined with AND.
///
/// `k` strategies produce `k * (k - 1) / 2` combinations.
pub fn all_and_strategies(strategies: &[Arc<dyn Strategy>]) -> Vec<Arc<dyn Strategy>> {
    let mut combined: Vec<Arc<dyn Strategy>> =
        Vec::with_capacity(strategies.len() * strategies.len().saturating_sub(1) / 2);

    for (i, first) in strategies.iter().enumerate() {
        for second in &strategies[i + 1..] {
            combined.push(Arc::new(AndStrategy::with(vec![first.clone(), second.clone()])));
        }
    }

    combined
}

/// The cartesian product of two strategy lists, each pair combined with AND.
///
/// A strategy paired with itself (same instance) is kept as is rather than
/// wrapped.
pub fn all_and_strategies_with(
    first: &[Arc<dyn Strategy>],
    second: &[Arc<dyn Strategy>],
) -> Vec<Arc<dyn Strategy>> {
    let mut combined: Vec<Arc<dyn Strategy>> = Vec::with_capacity(first.len() * second.len());

    for a in first {
        for b in second {
            if Arc::ptr_eq(a, b) {
                combined.push(a.clone());
            } else {
                combined.push(Arc::new(AndStrategy::with(vec![a.clone(), b.clone()])));
            }
        }
    }

    combined
}
