//! Outlier removal by quantile trimming.
//!
//! Thresholds are computed once over the full series and then frozen: the
//! filter never recomputes them on the shrinking subset.

use serde::Serialize;
use tracing::{debug, warn};
use viz_core::models::Series;
use viz_core::stats::{quantile_sorted, sorted_copy, TrimBounds};

// ── Thresholds ────────────────────────────────────────────────────────────────

/// Inclusive value range a record must fall into to survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    /// Quantiles of `series` at `bounds.lower` / `bounds.upper`.
    ///
    /// Returns `None` for an empty series.
    pub fn compute(series: &Series, bounds: TrimBounds) -> Option<Self> {
        let sorted = sorted_copy(&series.values());
        Some(Self {
            low: quantile_sorted(&sorted, bounds.lower)?,
            high: quantile_sorted(&sorted, bounds.upper)?,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

// ── CleanedSeries ─────────────────────────────────────────────────────────────

/// A series with extreme values removed, plus the frozen thresholds used.
#[derive(Debug, Clone, Serialize)]
pub struct CleanedSeries {
    pub series: Series,
    /// `None` only when the input was empty.
    pub thresholds: Option<Thresholds>,
    pub bounds: TrimBounds,
    /// How many input records were dropped.
    pub removed: usize,
}

impl CleanedSeries {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Drop values below the 2.5th or above the 97.5th percentile.
pub fn clean(series: &Series) -> CleanedSeries {
    clean_with(series, TrimBounds::default())
}

/// Drop values outside the `bounds` quantiles of `series`.
pub fn clean_with(series: &Series, bounds: TrimBounds) -> CleanedSeries {
    let Some(thresholds) = Thresholds::compute(series, bounds) else {
        return CleanedSeries {
            series: Series::default(),
            thresholds: None,
            bounds,
            removed: 0,
        };
    };

    let cleaned = apply_thresholds(series, &thresholds);
    let removed = series.len() - cleaned.len();

    debug!(
        "Trimmed to [{:.3}, {:.3}] (q{} / q{}): kept {}, removed {}",
        thresholds.low,
        thresholds.high,
        bounds.lower,
        bounds.upper,
        cleaned.len(),
        removed
    );
    if cleaned.is_empty() {
        warn!(
            "No records fall inside [{}, {}]; every chart will be empty",
            thresholds.low, thresholds.high
        );
    }

    CleanedSeries {
        series: cleaned,
        thresholds: Some(thresholds),
        bounds,
        removed,
    }
}

/// Keep only the records whose value lies inside `thresholds` (inclusive).
///
/// Re-applying the same thresholds to the output is a no-op.
pub fn apply_thresholds(series: &Series, thresholds: &Thresholds) -> Series {
    series.retain_where(|r| thresholds.contains(r.value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
