//! Asset snapshots: the input rows of every pipeline.

pub mod csv;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::helper::{map, Stream};

pub use self::csv::{read_from_csv_file, read_from_csv_reader, write_to_csv_file, AssetError};

/// One daily observation of an asset.
///
/// Field names follow the usual OHLCV CSV header
/// (`Date,Open,High,Low,Close,Volume`). The pipeline core only looks at
/// `date` and `close`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: i64,
}

impl Snapshot {
    /// Snapshot where every price field equals `close`.
    pub fn flat(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

/// Projects the date column.
pub fn snapshots_as_dates(snapshots: Stream<Snapshot>) -> Stream<NaiveDate> {
    map(snapshots, |s| s.date)
}

/// Projects the opening prices.
pub fn snapshots_as_openings(snapshots: Stream<Snapshot>) -> Stream<f64> {
    map(snapshots, |s| s.open)
}

/// Projects the daily highs.
pub fn snapshots_as_highs(snapshots: Stream<Snapshot>) -> Stream<f64> {
    map(snapshots, |s| s.high)
}

/// Projects the daily lows.
pub fn snapshots_as_lows(snapshots: Stream<Snapshot>) -> Stream<f64> {
    map(snapshots, |s| s.low)
}

/// Projects the closing prices.
pub fn snapshots_as_closings(snapshots: Stream<Snapshot>) -> Stream<f64> {
    map(snapshots, |s| s.close)
}

/// Projects the traded volumes.
pub fn snapshots_as_volumes(snapshots: Stream<Snapshot>) -> Stream<i64> {
    map(snapshots, |s| s.volume)
}

/// Builds one snapshot per closing price on consecutive calendar days.
///
/// Handy for tests and benchmarks that only care about closings.
pub fn snapshots_from_closings(start: NaiveDate, closings: &[f64]) -> Vec<Snapshot> {
    closings
        .iter()
        .enumerate()
        .map(|(i, &close)| Snapshot::flat(start + chrono::Duration::days(i as i64), close))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::{duplicate, from_vec, to_vec};

    fn sample() -> Vec<Snapshot> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        vec![
            Snapshot {
                date,
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: 500,
            },
            Snapshot {
                date: date.succ_opt().unwrap(),
                open: 11.0,
                high: 13.0,
                low: 10.5,
                close: 12.5,
                volume: 700,
            },
        ]
    }

    #[test]
    fn projections_pick_their_column() {
        let mut copies = duplicate(from_vec(sample()), 6);
        assert_eq!(to_vec(snapshots_as_volumes(copies.pop().unwrap())), vec![500, 700]);
        assert_eq!(to_vec(snapshots_as_closings(copies.pop().unwrap())), vec![11.0, 12.5]);
        assert_eq!(to_vec(snapshots_as_lows(copies.pop().unwrap())), vec![9.0, 10.5]);
        assert_eq!(to_vec(snapshots_as_highs(copies.pop().unwrap())), vec![12.0, 13.0]);
        assert_eq!(to_vec(snapshots_as_openings(copies.pop().unwrap())), vec![10.0, 11.0]);
        let dates = to_vec(snapshots_as_dates(copies.pop().unwrap()));
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn snapshots_from_closings_uses_consecutive_days() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let snapshots = snapshots_from_closings(start, &[1.0, 2.0, 3.0]);
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[2].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(snapshots[2].high, 3.0);
    }

    #[test]
    fn snapshot_serialization_uses_csv_header_names() {
        let json = serde_json::to_string(&sample()[0]).unwrap();
        assert!(json.contains("\"Date\":\"2024-01-02\""));
        assert!(json.contains("\"Close\":11.0"));
    }
}
