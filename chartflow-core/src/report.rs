//! Report sink: date-keyed columns zipped back into rows.
//!
//! A report owns a date stream and any number of named column streams, all
//! of which must be index-aligned with the dates. Columns are assigned to
//! charts: chart 0 is the main price chart, further charts (e.g. outcome)
//! are rendered on a separate axis. Rendering itself is left to consumers;
//! this module materialises the table and exports it as CSV.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::helper::Stream;

/// Errors from exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("column '{column}' assigned to chart {chart}, but only {charts} chart(s) exist")]
    UnknownChart {
        column: String,
        chart: usize,
        charts: usize,
    },
}

/// Values of a single report column.
#[derive(Debug)]
pub enum ColumnValues {
    Numeric(Stream<f64>),
    Annotation(Stream<String>),
}

/// A named column of a report.
#[derive(Debug)]
pub struct ReportColumn {
    name: String,
    values: ColumnValues,
}

impl ReportColumn {
    /// A numeric column, drawn as a line.
    pub fn numeric(name: impl Into<String>, values: Stream<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    /// A text annotation column (e.g. buy/sell markers).
    pub fn annotation(values: Stream<String>) -> Self {
        Self {
            name: "Annotation".into(),
            values: ColumnValues::Annotation(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One materialised cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Numeric(f64),
    Annotation(String),
}

impl ReportCell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Annotation(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Numeric(value) => value.to_string(),
            Self::Annotation(text) => text.clone(),
        }
    }
}

/// One row of a materialised report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub cells: Vec<ReportCell>,
}

/// A fully read report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: String,
    /// Column names, in insertion order (the date column is implicit).
    pub headers: Vec<String>,
    /// Chart index of each column.
    pub charts: Vec<usize>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of a numeric column.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| row.cells[index].as_f64())
            .collect()
    }
}

/// A report under construction.
#[derive(Debug)]
pub struct Report {
    title: String,
    dates: Stream<NaiveDate>,
    columns: Vec<(ReportColumn, usize)>,
    charts: usize,
}

impl Report {
    /// Starts a report with a single (main) chart.
    pub fn new(title: impl Into<String>, dates: Stream<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            dates,
            columns: Vec::new(),
            charts: 1,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Adds a chart and returns its index.
    pub fn add_chart(&mut self) -> usize {
        self.charts += 1;
        self.charts - 1
    }

    /// Adds a column to the main chart.
    pub fn add_column(&mut self, column: ReportColumn) {
        self.columns.push((column, 0));
    }

    /// Adds a column to the given chart.
    pub fn add_column_to(&mut self, column: ReportColumn, chart: usize) {
        self.columns.push((column, chart));
    }

    /// Reads every column in lockstep with the dates.
    ///
    /// Stops at the first date for which any column has closed; the
    /// remaining streams are dropped, which stops their producers.
    pub fn into_table(self) -> Result<ReportTable, ReportError> {
        if let Some((column, chart)) = self.columns.iter().find(|(_, chart)| *chart >= self.charts) {
            return Err(ReportError::UnknownChart {
                column: column.name.clone(),
                chart: *chart,
                charts: self.charts,
            });
        }

        let headers = self.columns.iter().map(|(c, _)| c.name.clone()).collect();
        let charts = self.columns.iter().map(|(_, chart)| *chart).collect();
        let mut rows = Vec::new();

        'rows: while let Some(date) = self.dates.recv() {
            let mut cells = Vec::with_capacity(self.columns.len());
            for (column, _) in &self.columns {
                let cell = match &column.values {
                    ColumnValues::Numeric(values) => values.recv().map(ReportCell::Numeric),
                    ColumnValues::Annotation(values) => values.recv().map(ReportCell::Annotation),
                };
                match cell {
                    Some(cell) => cells.push(cell),
                    None => break 'rows,
                }
            }
            rows.push(ReportRow { date, cells });
        }

        Ok(ReportTable {
            title: self.title,
            headers,
            charts,
            rows,
        })
    }

    /// Materialises the report and writes it as CSV with a leading Date column.
    pub fn write_csv<W: io::Write>(self, writer: W) -> Result<(), ReportError> {
        let table = self.into_table()?;
        let mut writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Date".to_string()];
        header.extend(table.headers.iter().cloned());
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![row.date.to_string()];
            record.extend(row.cells.iter().map(ReportCell::render));
            writer.write_record(&record)?;
        }

        writer.flush().map_err(|source| ReportError::Io {
            path: PathBuf::from("<writer>"),
            source,
        })
    }

    /// Writes the report as CSV to `path`.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(io::BufWriter::new(file))
    }
}
