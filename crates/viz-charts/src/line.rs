//! Daily page views as a single line.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;
use viz_core::error::Result;
use viz_core::settings::ChartKind;
use viz_data::aggregator::line_points;
use viz_data::cleaner::CleanedSeries;

use crate::layout::{draw_plain_axes, padded_range};
use crate::output::{prepare_target, render_error};
use crate::themes::{ChartTheme, FONT_FAMILY};

const TITLE_PREFIX: &str = "Daily freeCodeCamp Forum Page Views";

/// Chart title naming the first and last month of the data, e.g.
/// `"Daily freeCodeCamp Forum Page Views 5/2016-12/2019"`.
pub fn line_title(points: &[(NaiveDate, f64)]) -> String {
    match (points.first(), points.last()) {
        (Some((first, _)), Some((last, _))) => format!(
            "{} {}-{}",
            TITLE_PREFIX,
            first.format("%-m/%Y"),
            last.format("%-m/%Y")
        ),
        _ => TITLE_PREFIX.to_string(),
    }
}

/// Render `line_plot.png` into `out_dir` and return its path.
pub fn draw_line_plot(cleaned: &CleanedSeries, out_dir: &Path) -> Result<PathBuf> {
    draw_line_plot_with(cleaned, out_dir, &ChartTheme::line())
}

pub fn draw_line_plot_with(
    cleaned: &CleanedSeries,
    out_dir: &Path,
    theme: &ChartTheme,
) -> Result<PathBuf> {
    let path = prepare_target(out_dir, ChartKind::Line)?;
    let points = line_points(&cleaned.series);
    let title = line_title(&points);

    {
        let root = BitMapBackend::new(&path, (theme.width, theme.height)).into_drawing_area();
        render_line(&root, &points, &title, theme)
            .and_then(|_| root.present())
            .map_err(|e| render_error(&path, e))?;
    }

    info!("Wrote {} ({} points)", path.display(), points.len());
    Ok(path)
}

/// Draw the line chart onto any backend. The x axis counts days since the
/// first point.
fn render_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[(NaiveDate, f64)],
    title: &str,
    theme: &ChartTheme,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&theme.background)?;

    let start = points.first().map(|(date, _)| *date);
    let days = match (points.first(), points.last()) {
        (Some((first, _)), Some((last, _))) => ((*last - *first).num_days() as f64).max(1.0),
        _ => 1.0,
    };
    let x_range = 0.0..days;
    let y_range = padded_range(points.iter().map(|(_, v)| *v));

    let (x_area, y_area) = theme.label_areas();
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area);
    if theme.text_enabled {
        builder.caption(title, (FONT_FAMILY, theme.title_size));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    if theme.text_enabled {
        let date_label = |x: &f64| match start {
            Some(s) => (s + Duration::days(x.round() as i64))
                .format("%Y-%m")
                .to_string(),
            None => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Date")
            .y_desc("Page Views")
            .x_labels(12)
            .x_label_formatter(&date_label)
            .label_style((FONT_FAMILY, theme.label_size))
            .axis_desc_style((FONT_FAMILY, theme.label_size))
            .draw()?;
    } else {
        draw_plain_axes(&mut chart, &x_range, &y_range, theme.axis)?;
    }

    if let Some(start) = start {
        chart.draw_series(LineSeries::new(
            points
                .iter()
                .map(|(date, value)| ((*date - start).num_days() as f64, *value)),
            theme.line.stroke_width(theme.line_width),
        ))?;
    }

    Ok(())
}
