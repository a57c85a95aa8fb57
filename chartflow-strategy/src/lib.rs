//! Chartflow Strategy: trading recommendations built on stream pipelines.
//!
//! This crate contains:
//! - The three-valued `Action` and its annotation conversions
//! - The `Strategy` contract, outcome scoring and the standard report layout
//! - Group combinators (AND, majority, split) and their batch generators
//! - Decorators (delay, no-flat) that wrap a single inner strategy
//! - The Bollinger Bands width strategy as a concrete indicator consumer
//! - Serializable strategy configuration and a factory
//! - Parallel evaluation of many strategies over one snapshot series
//!
//! Every strategy emits exactly one action per consumed snapshot.

pub mod action;
pub mod and;
pub mod buy_and_hold;
pub mod config;
pub mod decorator;
pub mod evaluation;
pub mod majority;
pub mod split;
pub mod strategy;
pub mod volatility;

#[cfg(test)]
mod test_support;

pub use action::{actions_to_annotations, annotations_to_actions, normalize_actions, Action};
pub use and::{all_and_strategies, all_and_strategies_with, AndStrategy};
pub use buy_and_hold::BuyAndHoldStrategy;
pub use config::{build_strategy, ConfigError, StrategyConfig, StrategySet};
pub use decorator::{DelayStrategy, NoFlatStrategy};
pub use evaluation::{evaluate_strategies, evaluate_strategy, StrategyScore};
pub use majority::MajorityStrategy;
pub use split::{all_split_strategies, SplitStrategy};
pub use strategy::{
    action_sources, compute_with_outcome, count_actions, outcome, ActionCounts, Strategy,
};
pub use volatility::BollingerBandsWidthStrategy;
