//! Coordinate helpers shared by the chart renderers.

use std::ops::Range;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

/// A chart whose axes are both plain `f64`.
pub(crate) type PlainChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Fraction of the data span added above and below the data.
const RANGE_PAD: f64 = 0.05;

/// Range covering `values` with a little headroom.
///
/// Empty input yields `0.0..1.0`; a single repeated value is widened so the
/// axis never collapses.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let mut iter = values.into_iter().filter(|v| v.is_finite());
    let Some(first) = iter.next() else {
        return 0.0..1.0;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = max - min;
    let pad = if span > 0.0 {
        span * RANGE_PAD
    } else {
        (max.abs() * RANGE_PAD).max(1.0)
    };
    (min - pad)..(max + pad)
}

/// `0.0..max` with headroom, for bars that grow from zero.
pub(crate) fn zero_based_range(max: Option<f64>) -> Range<f64> {
    match max {
        Some(m) if m > 0.0 => 0.0..m * (1.0 + RANGE_PAD * 2.0),
        _ => 0.0..1.0,
    }
}

/// Label for a tick on a category axis whose categories sit at `i + 0.5`.
///
/// Ticks that fall between categories get an empty label.
pub(crate) fn category_label(labels: &[String], x: f64) -> String {
    let index = x.floor();
    if index < 0.0 || (x - index - 0.5).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Tick count that puts one tick on every category centre and boundary.
pub(crate) fn category_tick_count(categories: usize) -> usize {
    categories * 2 + 1
}

/// Bottom and left axis lines, used when no mesh (and thus no text) is drawn.
pub(crate) fn draw_plain_axes<DB: DrawingBackend>(
    chart: &mut PlainChart<'_, DB>,
    x: &Range<f64>,
    y: &Range<f64>,
    color: RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    chart.draw_series([
        PathElement::new(vec![(x.start, y.start), (x.end, y.start)], color.stroke_width(2)),
        PathElement::new(vec![(x.start, y.start), (x.start, y.end)], color.stroke_width(2)),
    ])?;
    Ok(())
}
