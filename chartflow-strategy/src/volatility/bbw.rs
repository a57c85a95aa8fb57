//! Bollinger Bands width strategy.
//!
//! Width is the band spread relative to the closing price:
//! `(upper - lower) / close`. A width at or above the sensitivity signals a
//! volatility breakout and emits Buy; anything else holds. The first
//! `period - 1` positions fall in the indicator's idle period and hold.
//! A zero closing price also holds.

use chartflow_core::asset::{snapshots_as_closings, Snapshot};
use chartflow_core::helper::{drain_in_background, duplicate, operate3, shift, Stream};
use chartflow_core::indicators::{BollingerBands, BollingerBandsOutput, Indicator};
use chartflow_core::report::{Report, ReportColumn};

use crate::action::Action;
use crate::strategy::{begin_report, finish_report, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBandsWidthStrategy {
    bands: BollingerBands,
    sensitivity: f64,
}

impl BollingerBandsWidthStrategy {
    /// Bands over `period` closings with the default multiplier.
    pub fn new(period: usize, sensitivity: f64) -> Self {
        Self::with_bands(BollingerBands::with_period(period), sensitivity)
    }

    pub fn with_bands(bands: BollingerBands, sensitivity: f64) -> Self {
        Self { bands, sensitivity }
    }

    pub fn bands(&self) -> &BollingerBands {
        &self.bands
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

impl Strategy for BollingerBandsWidthStrategy {
    fn name(&self) -> String {
        format!("BBW({},{:.3})", self.bands.period(), self.sensitivity)
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let idle = self.bands.idle_period();
        let mut closings = duplicate(snapshots_as_closings(snapshots), 2);

        let BollingerBandsOutput {
            upper,
            middle,
            lower,
        } = self.bands.compute(closings.remove(0));
        drain_in_background(middle);

        // NaN padding over the idle period compares false and holds. Zipping
        // with the full closing series keeps one action per snapshot even
        // when the input is shorter than the period.
        let upper = shift(upper, idle, f64::NAN);
        let lower = shift(lower, idle, f64::NAN);

        let sensitivity = self.sensitivity;
        operate3(upper, lower, closings.remove(0), move |upper, lower, closing| {
            if closing == 0.0 {
                return Action::Hold;
            }
            if (upper - lower) / closing >= sensitivity {
                Action::Buy
            } else {
                Action::Hold
            }
        })
    }

    /// Adds the three bands, padded with 0 over the idle period.
    fn report(&self, snapshots: Stream<Snapshot>) -> Report {
        let (mut report, outcomes, mut extras) = begin_report(self, snapshots, 1);
        let idle = self.bands.idle_period();
        let bands = self.bands.compute(snapshots_as_closings(extras.remove(0)));

        report.add_column(ReportColumn::numeric("Upper", shift(bands.upper, idle, 0.0)));
        report.add_column(ReportColumn::numeric("Middle", shift(bands.middle, idle, 0.0)));
        report.add_column(ReportColumn::numeric("Lower", shift(bands.lower, idle, 0.0)));
        finish_report(report, outcomes)
    }
}
