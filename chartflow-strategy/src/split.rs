//! Split strategy: one member decides when to buy, another when to sell.

use std::sync::Arc;

use chartflow_core::asset::Snapshot;
use chartflow_core::helper::{duplicate, operate, Stream};

use crate::action::Action;
use crate::strategy::Strategy;

/// Takes Buy decisions from `buy_strategy` and Sell decisions from
/// `sell_strategy`. A step where both fire is a conflict and holds.
#[derive(Clone)]
pub struct SplitStrategy {
    buy_strategy: Arc<dyn Strategy>,
    sell_strategy: Arc<dyn Strategy>,
}

impl SplitStrategy {
    pub fn new(buy_strategy: Arc<dyn Strategy>, sell_strategy: Arc<dyn Strategy>) -> Self {
        Self {
            buy_strategy,
            sell_strategy,
        }
    }

    pub fn buy_strategy(&self) -> &Arc<dyn Strategy> {
        &self.buy_strategy
    }

    pub fn sell_strategy(&self) -> &Arc<dyn Strategy> {
        &self.sell_strategy
    }
}

impl Strategy for SplitStrategy {
    fn name(&self) -> String {
        format!(
            "SPLIT(buy={},sell={})",
            self.buy_strategy.name(),
            self.sell_strategy.name()
        )
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let mut snapshots = duplicate(snapshots, 2);
        let sells = self.sell_strategy.compute(snapshots.remove(1));
        let buys = self.buy_strategy.compute(snapshots.remove(0));

        operate(buys, sells, |buy, sell| match (buy, sell) {
            (Action::Buy, Action::Sell) => Action::Hold,
            (Action::Buy, _) => Action::Buy,
            (_, Action::Sell) => Action::Sell,
            _ => Action::Hold,
        })
    }
}

/// Every ordered pair of distinct strategies as a split strategy.
///
/// `k` strategies produce `k * k - k` combinations.
pub fn all_split_strategies(strategies: &[Arc<dyn Strategy>]) -> Vec<Arc<dyn Strategy>> {
    let mut splits: Vec<Arc<dyn Strategy>> = Vec::with_capacity(strategies.len() * strategies.len());

    for buy in strategies {
        for sell in strategies {
            if Arc::ptr_eq(buy, sell) {
                continue;
            }
            splits.push(Arc::new(SplitStrategy::new(buy.clone(), sell.clone())));
        }
    }

    splits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action::{Buy, Hold, Sell};
    use crate::buy_and_hold::BuyAndHoldStrategy;
    use crate::majority::MajorityStrategy;
    use crate::test_support::{snapshots, Canned};
    use chartflow_core::helper::to_vec;

    #[test]
    fn buys_from_one_sells_from_the_other() {
        let split = SplitStrategy::new(
            Arc::new(Canned::new("buyer", vec![Buy, Sell, Hold, Buy])),
            Arc::new(Canned::new("seller", vec![Sell, Sell, Buy, Hold])),
        );
        let actions = to_vec(split.compute(snapshots(4)));
        assert_eq!(actions, vec![Hold, Sell, Hold, Buy]);
        assert_eq!(split.name(), "SPLIT(buy=buyer,sell=seller)");
    }

    #[test]
    fn conflicting_signals_hold() {
        let split = SplitStrategy::new(
            Arc::new(Canned::new("buyer", vec![Buy, Buy, Hold])),
            Arc::new(Canned::new("seller", vec![Sell, Hold, Sell])),
        );
        let actions = to_vec(split.compute(snapshots(3)));
        assert_eq!(actions, vec![Hold, Buy, Sell]);
    }

    #[test]
    fn output_matches_input_length() {
        let split = SplitStrategy::new(Arc::new(BuyAndHoldStrategy), Arc::new(BuyAndHoldStrategy));
        assert_eq!(to_vec(split.compute(snapshots(6))).len(), 6);
    }

    #[test]
    fn all_splits_skip_self_pairs() {
        let strategies: Vec<Arc<dyn Strategy>> = vec![
            Arc::new(BuyAndHoldStrategy),
            Arc::new(MajorityStrategy::new("", vec![Arc::new(BuyAndHoldStrategy)])),
            Arc::new(Canned::new("c", vec![])),
        ];
        let splits = all_split_strategies(&strategies);
        assert_eq!(splits.len(), 3 * 3 - 3);
    }
}
