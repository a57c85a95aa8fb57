//! Chartflow Core: the stream pipeline engine underneath every strategy.
//!
//! This crate contains:
//! - Stream primitives: duplicate, operate (zip), shift, skip, last, change,
//!   count, arithmetic maps, buffering, draining and the equality oracle
//! - Asset snapshots and their column projections, plus CSV fixture I/O
//! - The indicator capability with SMA, moving standard deviation and
//!   Bollinger Bands
//! - The report sink that zips date-keyed columns back together
//!
//! Every stage runs on its own worker thread and talks to its neighbours
//! only through a [`helper::Stream`]. Order is preserved everywhere, and
//! combining stages read exactly one element per input per step.

pub mod asset;
pub mod helper;
pub mod indicators;
pub mod report;

pub use asset::Snapshot;
pub use helper::{HelperError, Number, Stream};
pub use report::{Report, ReportColumn, ReportError};
