//! Serializable strategy configuration and the factory that builds it.
//!
//! Composite strategies nest: an `AND` group lists its members, a `DELAY`
//! wraps an inner strategy, and so on. A set of configurations is usually
//! read from TOML:
//!
//! ```toml
//! [[strategies]]
//! type = "DELAY"
//! period = 5
//! inner = { type = "BOLLINGER_BANDS_WIDTH", period = 20, sensitivity = 0.1 }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chartflow_core::indicators::BollingerBands;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::and::AndStrategy;
use crate::buy_and_hold::BuyAndHoldStrategy;
use crate::decorator::{DelayStrategy, NoFlatStrategy};
use crate::majority::MajorityStrategy;
use crate::split::SplitStrategy;
use crate::strategy::Strategy;
use crate::volatility::BollingerBandsWidthStrategy;

// ─── Error type ──────────────────────────────────────────────────────

/// Errors from loading or building strategy configurations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid strategy TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{strategy}: period must be >= 1, got {period}")]
    InvalidPeriod { strategy: &'static str, period: usize },

    #[error("{strategy}: needs at least one member strategy")]
    EmptyGroup { strategy: &'static str },

    #[error("{strategy}: invalid {name} {value}")]
    InvalidParameter {
        strategy: &'static str,
        name: &'static str,
        value: f64,
    },
}

// ─── Configuration ───────────────────────────────────────────────────

fn default_multiplier() -> f64 {
    BollingerBands::DEFAULT_MULTIPLIER
}

/// One strategy, possibly composed of others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyConfig {
    /// Buy on the first snapshot, hold afterwards.
    BuyAndHold,

    /// Buy when the Bollinger band width reaches `sensitivity`.
    BollingerBandsWidth {
        period: usize,
        sensitivity: f64,
        #[serde(default = "default_multiplier")]
        multiplier: f64,
    },

    /// Act only when every member agrees.
    And {
        #[serde(default)]
        name: Option<String>,
        members: Vec<StrategyConfig>,
    },

    /// Follow the strict majority of the members.
    Majority {
        #[serde(default)]
        name: Option<String>,
        members: Vec<StrategyConfig>,
    },

    /// Buy decisions from `buy`, sell decisions from `sell`.
    Split {
        buy: Box<StrategyConfig>,
        sell: Box<StrategyConfig>,
    },

    /// Hold for the first `period` snapshots.
    Delay {
        period: usize,
        inner: Box<StrategyConfig>,
    },

    /// Hold while the market is flat.
    NoFlat {
        period: usize,
        threshold: f64,
        inner: Box<StrategyConfig>,
    },
}

impl StrategyConfig {
    /// Short label of the variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BuyAndHold => "BUY_AND_HOLD",
            Self::BollingerBandsWidth { .. } => "BOLLINGER_BANDS_WIDTH",
            Self::And { .. } => "AND",
            Self::Majority { .. } => "MAJORITY",
            Self::Split { .. } => "SPLIT",
            Self::Delay { .. } => "DELAY",
            Self::NoFlat { .. } => "NO_FLAT",
        }
    }
}

/// A list of strategy configurations, e.g. everything to evaluate in one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StrategySet {
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl StrategySet {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let set: Self = toml::from_str(text)?;
        debug!(strategies = set.strategies.len(), "parsed strategy set");
        Ok(set)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Builds every strategy in order, failing on the first invalid one.
    pub fn build(&self) -> Result<Vec<Arc<dyn Strategy>>, ConfigError> {
        self.strategies.iter().map(build_strategy).collect()
    }
}

// ─── Factory ─────────────────────────────────────────────────────────

fn check_period(strategy: &'static str, period: usize) -> Result<usize, ConfigError> {
    if period == 0 {
        return Err(ConfigError::InvalidPeriod { strategy, period });
    }
    Ok(period)
}

fn check_finite(strategy: &'static str, name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            strategy,
            name,
            value,
        });
    }
    Ok(value)
}

fn build_members(
    strategy: &'static str,
    members: &[StrategyConfig],
) -> Result<Vec<Arc<dyn Strategy>>, ConfigError> {
    if members.is_empty() {
        return Err(ConfigError::EmptyGroup { strategy });
    }
    members.iter().map(build_strategy).collect()
}

/// Builds the strategy a configuration describes.
///
/// Validation happens here so that constructor assertions never fire on
/// user-supplied input.
pub fn build_strategy(config: &StrategyConfig) -> Result<Arc<dyn Strategy>, ConfigError> {
    let kind = config.kind();
    let strategy: Arc<dyn Strategy> = match config {
        StrategyConfig::BuyAndHold => Arc::new(BuyAndHoldStrategy::new()),

        StrategyConfig::BollingerBandsWidth {
            period,
            sensitivity,
            multiplier,
        } => {
            let period = check_period(kind, *period)?;
            let sensitivity = check_finite(kind, "sensitivity", *sensitivity)?;
            let multiplier = check_finite(kind, "multiplier", *multiplier)?;
            if multiplier < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    strategy: kind,
                    name: "multiplier",
                    value: multiplier,
                });
            }
            Arc::new(BollingerBandsWidthStrategy::with_bands(
                BollingerBands::new(period, multiplier),
                sensitivity,
            ))
        }

        StrategyConfig::And { name, members } => {
            let members = build_members(kind, members)?;
            match name {
                Some(name) => Arc::new(AndStrategy::new(name.clone(), members)),
                None => Arc::new(AndStrategy::with(members)),
            }
        }

        StrategyConfig::Majority { name, members } => {
            let members = build_members(kind, members)?;
            Arc::new(MajorityStrategy::new(name.clone().unwrap_or_default(), members))
        }

        StrategyConfig::Split { buy, sell } => {
            Arc::new(SplitStrategy::new(build_strategy(buy)?, build_strategy(sell)?))
        }

        // A zero delay is allowed and passes the inner actions through.
        StrategyConfig::Delay { period, inner } => {
            Arc::new(DelayStrategy::new(*period, build_strategy(inner)?))
        }

        StrategyConfig::NoFlat {
            period,
            threshold,
            inner,
        } => {
            let period = check_period(kind, *period)?;
            let threshold = check_finite(kind, "threshold", *threshold)?;
            Arc::new(NoFlatStrategy::new(period, threshold, build_strategy(inner)?))
        }
    };

    debug!(kind, name = %strategy.name(), "built strategy");
    Ok(strategy)
}
