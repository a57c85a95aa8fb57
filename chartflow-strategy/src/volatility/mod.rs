//! Volatility-driven strategies.

pub mod bbw;

pub use bbw::BollingerBandsWidthStrategy;
