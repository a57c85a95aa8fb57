//! Integration tests for realigning indicator output with its source.
//!
//! Mirrors how a strategy consumes an indicator: duplicate the closings,
//! skip the idle prefix on the companion copy, zip, then shift the result
//! back to full length.

use chartflow_core::asset::{snapshots_as_closings, snapshots_as_dates, snapshots_from_closings};
use chartflow_core::helper::{
    drain_in_background, duplicate, from_vec, operate, operate3, shift, skip, to_vec,
};
use chartflow_core::indicators::{BollingerBands, Indicator, Sma};
use chartflow_core::report::{Report, ReportColumn};
use chrono::NaiveDate;

fn closings() -> Vec<f64> {
    (0..30).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect()
}

#[test]
fn sma_realigned_to_source_length() {
    let sma = Sma::new(5);
    let mut copies = duplicate(from_vec(closings()), 2);
    let averages = sma.compute(copies.remove(0));
    let companions = skip(copies.remove(0), sma.idle_period());

    let spreads = operate(averages, companions, |avg, close| close - avg);
    let aligned = to_vec(shift(spreads, sma.idle_period(), 0.0));

    assert_eq!(aligned.len(), closings().len());
    assert!(aligned[..4].iter().all(|v| *v == 0.0));
}

#[test]
fn bollinger_width_pipeline_keeps_one_output_per_input() {
    let bands = BollingerBands::with_period(10);
    let mut copies = duplicate(from_vec(closings()), 2);
    let out = bands.compute(copies.remove(0));
    drain_in_background(out.middle);
    let companions = skip(copies.remove(0), bands.idle_period());

    let widths = operate3(out.upper, out.lower, companions, |u, l, c| (u - l) / c);
    let widths = to_vec(shift(widths, bands.idle_period(), f64::NAN));

    assert_eq!(widths.len(), 30);
    assert!(widths[..9].iter().all(|w| w.is_nan()));
    assert!(widths[9..].iter().all(|w| *w >= 0.0));
}

#[test]
fn report_rows_match_snapshot_count() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let snapshots = snapshots_from_closings(start, &closings());
    let mut copies = duplicate(from_vec(snapshots), 2);

    let mut report = Report::new("alignment", snapshots_as_dates(copies.remove(0)));
    report.add_column(ReportColumn::numeric("Close", snapshots_as_closings(copies.remove(0))));

    let table = report.into_table().unwrap();
    assert_eq!(table.rows.len(), 30);
    assert_eq!(table.rows[0].date, start);
}
