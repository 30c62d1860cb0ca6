use serde::Serialize;

use crate::error::{Result, VizError};

// ── Quantile helper ──────────────────────────────────────────────────────────

/// Compute the `q`-quantile (`0.0..=1.0`) of a **sorted** slice using linear
/// interpolation between closest ranks (the same algorithm as NumPy's default
/// `percentile`): `rank = q * (n - 1)`.
///
/// Returns `None` for an empty slice. `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted_data: &[f64], q: f64) -> Option<f64> {
    let len = sorted_data.len();
    if len == 0 {
        return None;
    }
    if len == 1 {
        return Some(sorted_data[0]);
    }
    let rank = q.clamp(0.0, 1.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted_data[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo]))
}

/// Sort a copy of `values` ascending. NaN sorts last.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// ── TrimBounds ───────────────────────────────────────────────────────────────

/// Lower and upper quantile used to trim extreme values from a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimBounds {
    pub lower: f64,
    pub upper: f64,
}

impl TrimBounds {
    /// Keeps the central 95 %.
    pub const DEFAULT_LOWER: f64 = 0.025;
    pub const DEFAULT_UPPER: f64 = 0.975;

    /// Validated constructor: requires `0 <= lower < upper <= 1`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) {
            return Err(VizError::Config(format!(
                "quantile bounds must lie in [0, 1], got {} and {}",
                lower, upper
            )));
        }
        if lower >= upper {
            return Err(VizError::Config(format!(
                "lower quantile {} must be below upper quantile {}",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }
}

impl Default for TrimBounds {
    fn default() -> Self {
        Self {
            lower: Self::DEFAULT_LOWER,
            upper: Self::DEFAULT_UPPER,
        }
    }
}

// ── BoxStats ─────────────────────────────────────────────────────────────────

/// Multiplier applied to the IQR to place the outlier fences.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Five-number summary plus Tukey outliers for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`
    pub lower_fence: f64,
    /// `q3 + 1.5 * iqr`
    pub upper_fence: f64,
    /// Smallest value that is not below `lower_fence`.
    pub whisker_low: f64,
    /// Largest value that is not above `upper_fence`.
    pub whisker_high: f64,
    /// Values outside the fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise `values` (any order). Returns `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        Self::from_sorted(&sorted)
    }

    /// Summarise an already sorted slice.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let q1 = quantile_sorted(sorted, 0.25)?;
        let median = quantile_sorted(sorted, 0.5)?;
        let q3 = quantile_sorted(sorted, 0.75)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - IQR_FENCE_FACTOR * iqr;
        let upper_fence = q3 + IQR_FENCE_FACTOR * iqr;

        // q1 and q3 always lie inside the fences, so at least one value does too.
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= lower_fence)
            .unwrap_or(min);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= upper_fence)
            .unwrap_or(max);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_fence || *v > upper_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            iqr,
            lower_fence,
            upper_fence,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── quantile_sorted ──────────────────────────────────────────────────────

    #[test]
    fn test_quantile_empty_returns_none() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_single_element() {
        assert_eq!(quantile_sorted(&[42.0], 0.025), Some(42.0));
        assert_eq!(quantile_sorted(&[42.0], 0.975), Some(42.0));
    }

    #[test]
    fn test_quantile_extremes_are_min_and_max() {
        let data = [10.0, 20.0, 30.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(10.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(30.0));
    }

    #[test]
    fn test_quantile_interpolates_between_ranks() {
        // rank = 0.5 * 3 = 1.5 → halfway between 2 and 3
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&data, 0.5).unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_quantile_trim_bounds_on_four_points() {
        // rank(0.025) = 0.075 → 1201 + 0.075 * 515
        // rank(0.975) = 2.925 → 2329 + 0.925 * 7671
        let data = [1201.0, 1716.0, 2329.0, 10000.0];
        let low = quantile_sorted(&data, 0.025).unwrap();
        let high = quantile_sorted(&data, 0.975).unwrap();
        assert!((low - 1239.625).abs() < 1e-9, "low = {low}");
        assert!((high - 9424.675).abs() < 1e-9, "high = {high}");
    }

    #[test]
    fn test_quantile_clamps_out_of_range_q() {
        let data = [1.0, 2.0];
        assert_eq!(quantile_sorted(&data, -1.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 2.0), Some(2.0));
    }

    // ── mean ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[100.0, 300.0]), Some(200.0));
    }

    // ── TrimBounds ───────────────────────────────────────────────────────────

    #[test]
    fn test_trim_bounds_default_is_central_95() {
        let bounds = TrimBounds::default();
        assert_eq!(bounds.lower, 0.025);
        assert_eq!(bounds.upper, 0.975);
    }

    #[test]
    fn test_trim_bounds_rejects_inverted() {
        let err = TrimBounds::new(0.9, 0.1).unwrap_err();
        assert!(err.to_string().contains("must be below"));
        assert!(TrimBounds::new(0.5, 0.5).is_err());
    }

    #[test]
    fn test_trim_bounds_rejects_out_of_range() {
        assert!(TrimBounds::new(-0.1, 0.5).is_err());
        assert!(TrimBounds::new(0.1, 1.5).is_err());
        assert!(TrimBounds::new(0.0, 1.0).is_ok());
    }

    // ── BoxStats ─────────────────────────────────────────────────────────────

    #[test]
    fn test_box_stats_empty_is_none() {
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_box_stats_five_numbers() {
        let stats = BoxStats::from_values(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.iqr, 2.0);
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
    }

    #[test]
    fn test_box_stats_flags_outliers_beyond_fences() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        // rank(0.25) = 1.25 → 2.25; rank(0.75) = 3.75 → 4.75
        assert!((stats.q1 - 2.25).abs() < 1e-9);
        assert!((stats.q3 - 4.75).abs() < 1e-9);
        assert!((stats.upper_fence - 8.5).abs() < 1e-9);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn test_box_stats_low_outlier() {
        let stats = BoxStats::from_values(&[-50.0, 10.0, 11.0, 12.0, 13.0]).unwrap();
        assert_eq!(stats.outliers, vec![-50.0]);
        assert_eq!(stats.whisker_low, 10.0);
        assert_eq!(stats.min, -50.0);
    }

    #[test]
    fn test_box_stats_constant_values() {
        let stats = BoxStats::from_values(&[7.0, 7.0, 7.0]).unwrap();
        assert_eq!(stats.iqr, 0.0);
        assert_eq!(stats.median, 7.0);
        assert!(stats.outliers.is_empty());
    }
}
