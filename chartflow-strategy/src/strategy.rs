//! Strategy contract, outcome scoring and shared pipeline helpers.
//!
//! A strategy turns a snapshot stream into an action stream with exactly one
//! action per snapshot. Configuration lives on the strategy value; every
//! `compute` call builds a fresh pipeline, so per-call state (windows,
//! counters) is never shared between invocations.

use std::sync::Arc;

use chartflow_core::asset::{snapshots_as_closings, snapshots_as_dates, Snapshot};
use chartflow_core::helper::{drain_in_background, duplicate, multiply_by, operate, Number, Stream};
use chartflow_core::report::{Report, ReportColumn};

use crate::action::{actions_to_annotations, Action};

/// The capability every strategy implements.
pub trait Strategy: Send + Sync {
    /// Display name, also used to label reports and scores.
    fn name(&self) -> String;

    /// Starts a pipeline producing one action per snapshot.
    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action>;

    /// Builds a report with Close, annotation and Outcome columns.
    fn report(&self, snapshots: Stream<Snapshot>) -> Report {
        let (report, outcomes, _) = begin_report(self, snapshots, 0);
        finish_report(report, outcomes)
    }
}

/// Running return of an account that starts with one unit of cash, buys
/// everything on `Buy` and sells everything on `Sell`.
///
/// Each element pairs the value at step `i` with the action at step `i` and
/// reports `(cash + shares * value) - 1`, so the sequence tracks how the
/// decisions made so far have paid off.
pub fn outcome<T>(values: Stream<T>, actions: Stream<Action>) -> Stream<f64>
where
    T: Number,
{
    let mut balance = 1.0;
    let mut shares = 0.0;
    operate(values, actions, move |value: T, action| {
        let price = value.to_f64().unwrap_or(f64::NAN);
        match action {
            Action::Buy if balance > 0.0 => {
                shares = balance / price;
                balance = 0.0;
            }
            Action::Sell if shares > 0.0 => {
                balance = shares * price;
                shares = 0.0;
            }
            _ => {}
        }
        balance + shares * price - 1.0
    })
}

/// Runs `strategy` and pairs its actions with the aligned outcome stream.
pub fn compute_with_outcome<S>(strategy: &S, snapshots: Stream<Snapshot>) -> (Stream<Action>, Stream<f64>)
where
    S: Strategy + ?Sized,
{
    let mut snapshots = duplicate(snapshots, 2);
    let closings = snapshots_as_closings(snapshots.remove(1));
    let mut actions = duplicate(strategy.compute(snapshots.remove(0)), 2);

    let outcomes = outcome(closings, actions.remove(1));
    (actions.remove(0), outcomes)
}

/// Feeds one copy of `snapshots` to each strategy and returns their action
/// streams in the same order.
///
/// With no strategies the snapshots are drained and nothing is returned.
pub fn action_sources(strategies: &[Arc<dyn Strategy>], snapshots: Stream<Snapshot>) -> Vec<Stream<Action>> {
    if strategies.is_empty() {
        drain_in_background(snapshots);
        return Vec::new();
    }

    duplicate(snapshots, strategies.len())
        .into_iter()
        .zip(strategies)
        .map(|(copy, strategy)| strategy.compute(copy))
        .collect()
}

/// Tally of one step's actions across a group of sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCounts {
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

/// Reads exactly one action from every source.
///
/// Returns `None` as soon as any source has closed, or when there are no
/// sources at all.
pub fn count_actions(sources: &[Stream<Action>]) -> Option<ActionCounts> {
    if sources.is_empty() {
        return None;
    }

    let mut counts = ActionCounts::default();
    for source in sources {
        match source.recv()? {
            Action::Buy => counts.buy += 1,
            Action::Hold => counts.hold += 1,
            Action::Sell => counts.sell += 1,
        }
    }
    Some(counts)
}

/// Lays out the standard report: Close and annotation columns on the main
/// chart. Returns the report, the outcome stream for [`finish_report`], and
/// `extra` additional snapshot copies for strategy-specific columns.
pub fn begin_report<S>(
    strategy: &S,
    snapshots: Stream<Snapshot>,
    extra: usize,
) -> (Report, Stream<f64>, Vec<Stream<Snapshot>>)
where
    S: Strategy + ?Sized,
{
    let mut snapshots = duplicate(snapshots, 3 + extra);
    let extras = snapshots.split_off(3);

    let (actions, outcomes) = compute_with_outcome(strategy, snapshots.remove(2));
    let closings = snapshots_as_closings(snapshots.remove(1));
    let dates = snapshots_as_dates(snapshots.remove(0));

    let mut report = Report::new(strategy.name(), dates);
    report.add_column(ReportColumn::numeric("Close", closings));
    report.add_column(ReportColumn::annotation(actions_to_annotations(actions)));

    (report, multiply_by(outcomes, 100.0), extras)
}

/// Appends the Outcome column (in percent) on its own chart.
pub fn finish_report(mut report: Report, outcomes: Stream<f64>) -> Report {
    let chart = report.add_chart();
    report.add_column_to(ReportColumn::numeric("Outcome", outcomes), chart);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action::{Buy, Hold, Sell};
    use chartflow_core::helper::{from_vec, to_vec};

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn outcome_tracks_round_trip() {
        let values = from_vec(vec![10.0, 12.0, 15.0, 9.0]);
        let actions = from_vec(vec![Buy, Hold, Sell, Hold]);
        let out = to_vec(outcome(values, actions));
        assert_close(&out, &[0.0, 0.2, 0.5, 0.5]);
    }

    #[test]
    fn outcome_ignores_sell_without_position() {
        let values = from_vec(vec![10, 20]);
        let actions = from_vec(vec![Sell, Sell]);
        assert_close(&to_vec(outcome(values, actions)), &[0.0, 0.0]);
    }

    #[test]
    fn count_actions_reads_one_per_source() {
        let sources = vec![
            from_vec(vec![Buy, Sell]),
            from_vec(vec![Buy, Hold]),
            from_vec(vec![Sell, Hold]),
        ];
        assert_eq!(
            count_actions(&sources),
            Some(ActionCounts {
                buy: 2,
                hold: 0,
                sell: 1
            })
        );
        assert_eq!(
            count_actions(&sources),
            Some(ActionCounts {
                buy: 0,
                hold: 2,
                sell: 1
            })
        );
        assert_eq!(count_actions(&sources), None);
    }

    #[test]
    fn count_actions_without_sources_is_none() {
        assert_eq!(count_actions(&[]), None);
    }
}
