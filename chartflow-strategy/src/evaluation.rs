//! Batch evaluation: score many strategies over the same snapshots.
//!
//! Every strategy gets its own pipeline fed from the shared slice, and the
//! strategies run in parallel on the rayon pool. The score is the final
//! outcome value, i.e. the return of the one-unit account after the last
//! snapshot.

use std::sync::Arc;

use chartflow_core::asset::Snapshot;
use chartflow_core::helper::{drain_in_background, from_vec, last};
use rayon::prelude::*;
use tracing::debug;

use crate::strategy::{compute_with_outcome, Strategy};

/// Final outcome of one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyScore {
    pub name: String,
    pub outcome: f64,
}

/// Scores a single strategy; 0 when there are no snapshots.
pub fn evaluate_strategy(strategy: &dyn Strategy, snapshots: &[Snapshot]) -> StrategyScore {
    let (actions, outcomes) = compute_with_outcome(strategy, from_vec(snapshots.to_vec()));
    drain_in_background(actions);

    let outcome = last(outcomes, 1).recv().unwrap_or(0.0);
    StrategyScore {
        name: strategy.name(),
        outcome,
    }
}

/// Scores every strategy and returns the scores best first.
///
/// Ties keep the input order.
pub fn evaluate_strategies(strategies: &[Arc<dyn Strategy>], snapshots: &[Snapshot]) -> Vec<StrategyScore> {
    debug!(strategies = strategies.len(), snapshots = snapshots.len(), "evaluating strategies");

    let mut scores: Vec<StrategyScore> = strategies
        .par_iter()
        .map(|strategy| evaluate_strategy(strategy.as_ref(), snapshots))
        .collect();

    scores.sort_by(|a, b| b.outcome.total_cmp(&a.outcome));
    scores
}
