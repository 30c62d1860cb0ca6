//! Load-and-clean pipeline.
//!
//! Produces a [`PreparedData`] holding the raw series, the cleaned series and
//! run metadata. The cleaned series is computed once here and handed to each
//! renderer explicitly.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use viz_core::error::Result;
use viz_core::models::Series;
use viz_core::stats::TrimBounds;

use crate::cleaner::{clean_with, CleanedSeries};
use crate::reader::{load_series_with, LoaderOptions};

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for [`prepare_data`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub loader: LoaderOptions,
    pub bounds: TrimBounds,
}

/// Metadata produced alongside the prepared data.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    pub source: PathBuf,
    pub rows_loaded: usize,
    pub rows_kept: usize,
    pub rows_removed: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Wall-clock seconds spent reading and parsing the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent computing thresholds and filtering.
    pub clean_time_seconds: f64,
}

/// The complete output of [`prepare_data`].
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub raw: Series,
    pub cleaned: CleanedSeries,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the data pipeline.
///
/// 1. Load and validate the series from `path`.
/// 2. Compute the trim thresholds over the full series and filter.
/// 3. Return both series plus metadata.
pub fn prepare_data(path: &Path, options: &AnalysisOptions) -> Result<PreparedData> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let raw = load_series_with(path, &options.loader)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Clean ─────────────────────────────────────────────────────────
    let clean_start = std::time::Instant::now();
    let cleaned = clean_with(&raw, options.bounds);
    let clean_time = clean_start.elapsed().as_secs_f64();

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: path.to_path_buf(),
        rows_loaded: raw.len(),
        rows_kept: cleaned.len(),
        rows_removed: cleaned.removed,
        first_date: raw.first_date(),
        last_date: raw.last_date(),
        load_time_seconds: load_time,
        clean_time_seconds: clean_time,
    };

    info!(
        "Prepared {}: {} rows loaded, {} kept after trimming",
        path.display(),
        metadata.rows_loaded,
        metadata.rows_kept
    );

    Ok(PreparedData {
        raw,
        cleaned,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
