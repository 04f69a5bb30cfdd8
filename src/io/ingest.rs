//! CSV column ingest.
//!
//! Reads one numeric column (and optionally a date column) from a delimited
//! text file with a header row.
//!
//! Behavior:
//! - columns are addressed by 0-based position or case-insensitive header name
//! - rows whose value cell is missing or not a finite number are skipped and
//!   reported as row errors (logged at `warn`)
//! - a missing file or column, or zero usable rows, makes the source unavailable

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, warn};

use crate::data::DataSource;
use crate::domain::{ColumnSelector, Series};
use crate::error::DataUnavailable;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output before it is reduced to a `Series`.
#[derive(Debug, Clone)]
pub struct IngestedColumn {
    pub header: String,
    pub values: Vec<f64>,
    pub dates: Option<Vec<NaiveDate>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// One column of a CSV file as a data source.
#[derive(Debug, Clone)]
pub struct CsvColumnSource {
    pub path: PathBuf,
    pub column: ColumnSelector,
    pub date_column: Option<ColumnSelector>,
}

impl CsvColumnSource {
    pub fn new(path: PathBuf, column: ColumnSelector, date_column: Option<ColumnSelector>) -> Self {
        Self {
            path,
            column,
            date_column,
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> DataUnavailable {
        DataUnavailable::new(self.path.display().to_string(), reason)
    }

    /// Read the file and collect the selected column plus row errors.
    pub fn ingest(&self) -> Result<IngestedColumn, DataUnavailable> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(format!("failed to open CSV: {e}")))?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.unavailable(format!("failed to read CSV headers: {e}")))?
            .clone();

        let header_map = build_header_map(&headers);
        let value_idx = resolve_column(&self.column, &headers, &header_map)
            .ok_or_else(|| self.unavailable(format!("column {} not found", self.column)))?;
        let date_idx = match &self.date_column {
            Some(sel) => Some(
                resolve_column(sel, &headers, &header_map)
                    .ok_or_else(|| self.unavailable(format!("date column {sel} not found")))?,
            ),
            None => None,
        };
        let header = headers
            .get(value_idx)
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .unwrap_or_default();

        let mut values = Vec::new();
        let mut dates = Vec::new();
        let mut row_errors = Vec::new();
        let mut rows_read = 0usize;

        for (idx, result) in reader.records().enumerate() {
            // +2 because:
            // - records() starts at line 1 after headers
            // - CSV is 1-based line numbers
            let line = idx + 2;
            rows_read += 1;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    row_errors.push(RowError {
                        line,
                        message: format!("CSV parse error: {e}"),
                    });
                    continue;
                }
            };

            match parse_row(&record, value_idx, date_idx) {
                Ok((value, date)) => {
                    values.push(value);
                    if let Some(d) = date {
                        dates.push(d);
                    }
                }
                Err(message) => row_errors.push(RowError { line, message }),
            }
        }

        for e in &row_errors {
            warn!("{}: line {}: {}", self.path.display(), e.line, e.message);
        }

        if values.is_empty() {
            return Err(self.unavailable(format!(
                "no usable rows in column {} ({rows_read} read, {} skipped)",
                self.column,
                row_errors.len()
            )));
        }

        debug!(
            "ingested {} values from {} (column {}, {} skipped)",
            values.len(),
            self.path.display(),
            self.column,
            row_errors.len()
        );

        Ok(IngestedColumn {
            header,
            values,
            dates: date_idx.map(|_| dates),
            row_errors,
            rows_read,
        })
    }
}

impl DataSource for CsvColumnSource {
    fn name(&self) -> String {
        format!("{} [{}]", self.path.display(), self.column)
    }

    fn load(&self) -> Result<Series, DataUnavailable> {
        let ingested = self.ingest()?;
        Ok(Series {
            name: format!("{} [{}]", self.path.display(), ingested.header),
            values: ingested.values,
            dates: ingested.dates,
            skipped: ingested.row_errors.len(),
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, name lookups on that column fail.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(sel: &ColumnSelector, headers: &StringRecord, header_map: &HashMap<String, usize>) -> Option<usize> {
    match sel {
        ColumnSelector::Index(idx) if *idx < headers.len() => Some(*idx),
        ColumnSelector::Index(_) => None,
        ColumnSelector::Name(name) => header_map.get(&normalize_header_name(name)).copied(),
    }
}

fn parse_row(record: &StringRecord, value_idx: usize, date_idx: Option<usize>) -> Result<(f64, Option<NaiveDate>), String> {
    let raw = record
        .get(value_idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing value.".to_string())?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid number '{raw}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite value '{raw}'."));
    }

    let date = match date_idx {
        Some(idx) => {
            let raw = record
                .get(idx)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| "Missing date.".to_string())?;
            Some(parse_date(raw)?)
        }
        None => None,
    };

    Ok((value, date))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are preferred, but spreadsheet exports often use day-first
    // formats. Accept a small fixed set so parsing stays deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("trendfit_ingest_{}_{name}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const PRICES: &str = "\u{feff}date,open,high\n\
        2018-02-07,10.0,10.5\n\
        2018-02-08,11.5,12.0\n\
        2018-02-09,n/a,12.1\n\
        2018-02-12,,12.2\n\
        2018-02-13,13.0,13.2\n";

    #[test]
    fn second_column_by_default_position() {
        let path = write_temp_csv("by_index", PRICES);
        let src = CsvColumnSource::new(path.clone(), ColumnSelector::Index(1), None);
        let out = src.ingest().unwrap();

        assert_eq!(out.header, "open");
        assert_eq!(out.values, vec![10.0, 11.5, 13.0]);
        assert_eq!(out.rows_read, 5);
        assert_eq!(out.row_errors.len(), 2);
        assert_eq!(out.row_errors[0].line, 4);
        assert_eq!(out.row_errors[1].line, 5);
        assert!(out.dates.is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn column_by_name_with_dates() {
        let path = write_temp_csv("by_name", PRICES);
        let src = CsvColumnSource::new(
            path.clone(),
            ColumnSelector::Name("HIGH".to_string()),
            Some(ColumnSelector::Name("Date".to_string())),
        );
        let series = src.load().unwrap();

        assert_eq!(series.values, vec![10.5, 12.0, 12.1, 12.2, 13.2]);
        let dates = series.dates.unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2018, 2, 7).unwrap());
        assert_eq!(series.skipped, 0);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_column_is_unavailable() {
        let path = write_temp_csv("missing_col", PRICES);
        let src = CsvColumnSource::new(path.clone(), ColumnSelector::Name("close".to_string()), None);
        let err = src.load().unwrap_err();
        assert!(err.reason.contains("not found"));

        let src = CsvColumnSource::new(path.clone(), ColumnSelector::Index(9), None);
        assert!(src.load().is_err());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let src = CsvColumnSource::new(
            PathBuf::from("/definitely/not/here.csv"),
            ColumnSelector::Index(1),
            None,
        );
        let err = src.load().unwrap_err();
        assert!(err.reason.contains("failed to open CSV"));
    }

    #[test]
    fn no_usable_rows_is_unavailable() {
        let path = write_temp_csv("empty", "date,value\n2020-01-01,abc\n");
        let src = CsvColumnSource::new(path.clone(), ColumnSelector::Index(1), None);
        assert!(src.load().is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn parse_date_accepts_day_first() {
        let d = parse_date("07/02/2018").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2018, 2, 7).unwrap());
        assert!(parse_date("2018.02.07").is_err());
    }
}
