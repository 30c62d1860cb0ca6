//! Delimited-file loading for the page-view visualizer.
//!
//! Reads the `date` / `value` columns of the source file and converts them
//! into a date-sorted [`Series`] for downstream processing.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use viz_core::dates::DateParser;
use viz_core::error::{Result, VizError};
use viz_core::models::{DuplicateDateError, Record, Series};

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = ["date", "value"];

// ── LoaderOptions ─────────────────────────────────────────────────────────────

/// How the source file is split into fields.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Single-byte field delimiter.
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `path` as a comma-separated file. See [`load_series_with`].
pub fn load_series(path: &Path) -> Result<Series> {
    load_series_with(path, &LoaderOptions::default())
}

/// Load a delimited page-view file into a [`Series`].
///
/// * The header must name a `date` and a `value` column; other columns are
///   ignored and surrounding whitespace is trimmed from every field.
/// * Every row must carry a parseable date and a finite number, otherwise
///   the whole load fails with [`VizError::MalformedInput`] naming the line.
/// * A date that appears twice fails with [`VizError::DuplicateDate`] naming
///   the line of the second occurrence.
///
/// The returned series is sorted by date ascending.
pub fn load_series_with(path: &Path, options: &LoaderOptions) -> Result<Series> {
    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(VizError::MissingFile(path.to_path_buf())),
        Err(source) => {
            return Err(VizError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| from_csv_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| from_csv_error(path, e))?
        .clone();
    check_required_columns(path, &headers)?;

    let mut records: Vec<Record> = Vec::new();
    let mut first_seen: HashMap<NaiveDate, u64> = HashMap::new();
    for row_result in reader.records() {
        let row = row_result.map_err(|e| from_csv_error(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| malformed(path, line, e.to_string()))?;
        let record = parse_row(path, line, &raw)?;
        if first_seen.insert(record.date, line).is_some() {
            return Err(VizError::DuplicateDate {
                path: path.to_path_buf(),
                line,
                date: record.date,
            });
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(malformed(path, 1, "file contains no data rows"));
    }

    let rows_read = records.len();
    // Dates were checked row by row above, so this only sorts.
    let series = Series::from_records(records)
        .map_err(|DuplicateDateError(date)| malformed(path, 0, format!("duplicate date {date}")))?;

    debug!(
        "Loaded {} rows from {} ({:?} to {:?})",
        rows_read,
        path.display(),
        series.first_date(),
        series.last_date(),
    );

    Ok(series)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// The two columns we care about, still as text so that parse failures can
/// be reported with our own wording.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    value: String,
}

fn check_required_columns(path: &Path, headers: &csv::StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(malformed(
                path,
                1,
                format!("missing required column `{}`", column),
            ));
        }
    }
    Ok(())
}

fn parse_row(path: &Path, line: u64, raw: &RawRow) -> Result<Record> {
    let date = DateParser::parse(&raw.date)
        .ok_or_else(|| malformed(path, line, format!("unparseable date {:?}", raw.date)))?;

    let value: f64 = raw
        .value
        .parse()
        .map_err(|_| malformed(path, line, format!("value {:?} is not a number", raw.value)))?;
    if !value.is_finite() {
        return Err(malformed(
            path,
            line,
            format!("value {:?} is not finite", raw.value),
        ));
    }

    Ok(Record::new(date, value))
}

fn malformed(path: &Path, line: u64, reason: impl Into<String>) -> VizError {
    VizError::MalformedInput {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// I/O failures keep their source; everything else the csv reader reports
/// (bad UTF-8, ragged rows) is a malformed-input error.
fn from_csv_error(path: &Path, err: csv::Error) -> VizError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => VizError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => malformed(path, line, reason),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
