//! End-to-end tests: CSV fixtures in, strategy configs built, reports out.

use std::io::Write;
use std::sync::Arc;

use chartflow_core::asset::{read_from_csv_file, snapshots_from_closings, write_to_csv_file, Snapshot};
use chartflow_core::helper::{check_equals, from_vec, map};
use chartflow_strategy::{
    compute_with_outcome, evaluate_strategies, Action, BollingerBandsWidthStrategy,
    BuyAndHoldStrategy, DelayStrategy, NoFlatStrategy, Strategy, StrategySet,
};
use chrono::NaiveDate;

fn fixture() -> Vec<Snapshot> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let closings: Vec<f64> = (0..60)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.2)
        .collect();
    snapshots_from_closings(start, &closings)
}

#[test]
fn default_report_layout() {
    let table = BuyAndHoldStrategy
        .report(from_vec(fixture()))
        .into_table()
        .unwrap();

    assert_eq!(table.title, "Buy and Hold");
    assert_eq!(table.headers, vec!["Close", "Annotation", "Outcome"]);
    assert_eq!(table.charts, vec![0, 0, 1]);
    assert_eq!(table.rows.len(), 60);
}

#[test]
fn composite_report_is_aligned_with_dates() {
    let inner = Arc::new(BollingerBandsWidthStrategy::new(10, 0.05));
    let strategy = NoFlatStrategy::new(5, 1.0, Arc::new(DelayStrategy::new(2, inner)));
    let snapshots = fixture();

    let table = strategy.report(from_vec(snapshots.clone())).into_table().unwrap();
    assert_eq!(table.rows.len(), snapshots.len());
    for (row, snapshot) in table.rows.iter().zip(&snapshots) {
        assert_eq!(row.date, snapshot.date);
    }
}

#[test]
fn report_written_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bbw.csv");

    BollingerBandsWidthStrategy::new(5, 0.05)
        .report(from_vec(fixture()))
        .write_to_file(&path)
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Close,Annotation,Upper,Middle,Lower,Outcome")
    );
    assert_eq!(lines.count(), 60);
}

#[test]
fn csv_fixture_drives_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("series.csv");
    write_to_csv_file(&path, fixture()).unwrap();

    let snapshots = read_from_csv_file::<Snapshot>(&path, true).unwrap();
    let expected = BuyAndHoldStrategy.compute(from_vec(fixture()));
    check_equals(BuyAndHoldStrategy.compute(snapshots), expected).unwrap();
}

#[test]
fn outcome_stream_is_aligned() {
    let (actions, outcomes) = compute_with_outcome(&BuyAndHoldStrategy, from_vec(fixture()));
    let annotations: Vec<String> = map(actions, |a: Action| a.annotation().to_string()).collect();
    let outcomes: Vec<f64> = outcomes.collect();

    assert_eq!(annotations.len(), outcomes.len());
    assert_eq!(annotations[0], "B");
    assert_eq!(outcomes[0], 0.0);
}

#[test]
fn strategies_from_toml_file_are_ranked() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[strategies]]
type = "BUY_AND_HOLD"

[[strategies]]
type = "DELAY"
period = 30
inner = {{ type = "BUY_AND_HOLD" }}

[[strategies]]
type = "SPLIT"
buy = {{ type = "BUY_AND_HOLD" }}
sell = {{ type = "BOLLINGER_BANDS_WIDTH", period = 10, sensitivity = 0.5 }}
"#
    )
    .unwrap();

    let strategies = StrategySet::from_toml_file(file.path()).unwrap().build().unwrap();
    assert_eq!(strategies.len(), 3);

    let scores = evaluate_strategies(&strategies, &fixture());
    assert_eq!(scores.len(), 3);
    for pair in scores.windows(2) {
        assert!(pair[0].outcome >= pair[1].outcome);
    }
    // Delayed buy-and-hold never buys: its only Buy falls inside the delay.
    let delayed = scores.iter().find(|s| s.name.starts_with("D(30,")).unwrap();
    assert_eq!(delayed.outcome, 0.0);
}
