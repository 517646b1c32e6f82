//! FRED CSV ingest and cleaning.
//!
//! This module turns the raw `fredgraph.csv` download into a clean `Series`.
//!
//! Design goals:
//! - **Header-text matching** for the preamble (its length changes between releases)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (duplicates resolve to the later row, output is sorted)
//! - **Separation of concerns**: no analysis logic here

use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use crate::domain::{Observation, Series};

/// Date column name used by FRED graph CSV exports.
pub const DATE_COLUMN: &str = "observation_date";

/// FRED's placeholder for a missing observation.
const MISSING_SENTINEL: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("header line `{header}` not found in feed")]
    HeaderNotFound { header: String },
    #[error("no usable observations after cleaning ({rows_read} data rows read)")]
    EmptyAfterCleaning { rows_read: usize },
}

/// A data row that was dropped during cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the raw feed.
    pub line: usize,
    pub message: String,
}

/// Ingest output: cleaned series + row accounting.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub series: Series,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

/// Parser for one FRED series, keyed by the literal header it expects.
#[derive(Debug, Clone)]
pub struct SeriesParser {
    header: String,
}

impl SeriesParser {
    pub fn new(series_id: &str) -> Self {
        Self {
            header: format!("{DATE_COLUMN},{series_id}"),
        }
    }

    pub fn parse(&self, raw: &str) -> Result<Series, ParseError> {
        self.parse_with_report(raw).map(|ingested| ingested.series)
    }

    pub fn parse_with_report(&self, raw: &str) -> Result<IngestedSeries, ParseError> {
        let header_idx = raw
            .lines()
            .position(|line| normalize_line(line) == self.header)
            .ok_or_else(|| ParseError::HeaderNotFound {
                header: self.header.clone(),
            })?;

        let body: Vec<&str> = raw.lines().skip(header_idx + 1).collect();
        let body = body.join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut observations = Vec::new();
        let mut row_errors = Vec::new();
        let mut rows_read = 0usize;

        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    rows_read += 1;
                    let line = e
                        .position()
                        .map(|p| header_idx + 1 + p.line() as usize)
                        .unwrap_or(header_idx + 1 + rows_read);
                    row_errors.push(RowError {
                        line,
                        message: format!("CSV parse error: {e}"),
                    });
                    continue;
                }
            };

            if is_blank(&record) {
                continue;
            }
            rows_read += 1;

            // Position lines are 1-based within `body`, which starts right after the header.
            let line = record
                .position()
                .map(|p| header_idx + 1 + p.line() as usize)
                .unwrap_or(header_idx + 1 + rows_read);

            match parse_row(&record) {
                Ok(obs) => observations.push(obs),
                Err(message) => row_errors.push(RowError { line, message }),
            }
        }

        let series = Series::from_observations(observations);
        if series.is_empty() {
            return Err(ParseError::EmptyAfterCleaning { rows_read });
        }

        Ok(IngestedSeries {
            series,
            rows_read,
            row_errors,
        })
    }
}

fn normalize_line(line: &str) -> &str {
    line.trim_start_matches('\u{feff}').trim()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn parse_row(record: &StringRecord) -> Result<Observation, String> {
    let date_raw = record
        .get(0)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing date field.".to_string())?;
    let value_raw = record
        .get(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing value field.".to_string())?;

    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{date_raw}': {e}"))?;
    let value = parse_value(value_raw)?;

    Ok(Observation::new(date, value))
}

fn parse_value(raw: &str) -> Result<f64, String> {
    if raw == MISSING_SENTINEL {
        return Err("Missing observation ('.').".to_string());
    }
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Non-numeric value '{raw}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite value '{raw}'."));
    }
    if v < 0.0 {
        return Err(format!("Negative value '{raw}'."));
    }
    Ok(v)
}
