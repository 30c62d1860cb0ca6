//! Side-by-side box plots: distribution per year and per calendar month.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;
use viz_core::error::Result;
use viz_core::settings::ChartKind;
use viz_core::stats::BoxStats;
use viz_data::aggregator::{distribution_groups, DistributionGroups};
use viz_data::cleaner::CleanedSeries;

use crate::layout::{
    category_label, category_tick_count, draw_plain_axes, padded_range, PlainChart,
};
use crate::output::{prepare_target, render_error};
use crate::themes::{ChartTheme, FONT_FAMILY};

/// Half the width of a box, in category units.
const BOX_HALF_WIDTH: f64 = 0.3;
/// Half the width of a whisker cap.
const CAP_HALF_WIDTH: f64 = 0.15;
const OUTLIER_RADIUS: i32 = 4;

/// One box plot: a title, an x axis caption and one box per group.
#[derive(Debug, Clone)]
pub struct BoxPanel {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub labels: Vec<String>,
    /// `None` draws nothing for that slot but keeps its label.
    pub stats: Vec<Option<BoxStats>>,
}

impl BoxPanel {
    /// Year-wise panel; one box per year present, ascending.
    pub fn trend(groups: &DistributionGroups) -> Self {
        Self {
            title: "Year-wise Box Plot (Trend)",
            x_desc: "Year",
            labels: groups.by_year.iter().map(|g| g.label.to_string()).collect(),
            stats: groups.by_year.iter().map(|g| g.summary()).collect(),
        }
    }

    /// Month-wise panel; always twelve slots, January first.
    pub fn seasonality(groups: &DistributionGroups) -> Self {
        Self {
            title: "Month-wise Box Plot (Seasonality)",
            x_desc: "Month",
            labels: groups
                .by_month
                .iter()
                .map(|g| g.label.abbrev().to_string())
                .collect(),
            stats: groups.by_month.iter().map(|g| g.summary()).collect(),
        }
    }

    /// Value range spanned by every box, whisker and outlier.
    fn value_range(&self) -> std::ops::Range<f64> {
        padded_range(self.stats.iter().flatten().flat_map(|s| [s.min, s.max]))
    }
}

/// Render `box_plot.png` into `out_dir` and return its path.
pub fn draw_box_plot(cleaned: &CleanedSeries, out_dir: &Path) -> Result<PathBuf> {
    draw_box_plot_with(cleaned, out_dir, &ChartTheme::boxes())
}

pub fn draw_box_plot_with(
    cleaned: &CleanedSeries,
    out_dir: &Path,
    theme: &ChartTheme,
) -> Result<PathBuf> {
    let path = prepare_target(out_dir, ChartKind::Box)?;
    let groups = distribution_groups(&cleaned.series);
    let panels = [BoxPanel::trend(&groups), BoxPanel::seasonality(&groups)];

    {
        let root = BitMapBackend::new(&path, (theme.width, theme.height)).into_drawing_area();
        render_boxes(&root, &panels, theme)
            .and_then(|_| root.present())
            .map_err(|e| render_error(&path, e))?;
    }

    info!(
        "Wrote {} ({} year groups)",
        path.display(),
        groups.by_year.len()
    );
    Ok(path)
}

fn render_boxes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panels: &[BoxPanel; 2],
    theme: &ChartTheme,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&theme.background)?;

    let (left, right) = root.split_horizontally(theme.width / 2);
    render_panel(&left, &panels[0], theme)?;
    render_panel(&right, &panels[1], theme)?;
    Ok(())
}

fn render_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &BoxPanel,
    theme: &ChartTheme,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_range = 0.0..panel.labels.len().max(1) as f64;
    let y_range = panel.value_range();

    let (x_area, y_area) = theme.label_areas();
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(theme.margin)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area);
    if theme.text_enabled {
        builder.caption(panel.title, (FONT_FAMILY, theme.title_size));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    if theme.text_enabled {
        let group_label = |x: &f64| category_label(&panel.labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(panel.x_desc)
            .y_desc("Page Views")
            .x_labels(category_tick_count(panel.labels.len()))
            .x_label_formatter(&group_label)
            .label_style((FONT_FAMILY, theme.label_size))
            .axis_desc_style((FONT_FAMILY, theme.label_size))
            .draw()?;
    } else {
        draw_plain_axes(&mut chart, &x_range, &y_range, theme.axis)?;
    }

    draw_boxes(&mut chart, panel, theme)
}

fn draw_boxes<DB: DrawingBackend>(
    chart: &mut PlainChart<'_, DB>,
    panel: &BoxPanel,
    theme: &ChartTheme,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut fills = Vec::new();
    let mut outlines = Vec::new();
    let mut strokes = Vec::new();
    let mut outliers = Vec::new();

    for (slot, stats) in panel.stats.iter().enumerate() {
        let Some(s) = stats else { continue };
        let centre = slot as f64 + 0.5;
        let (box_left, box_right) = (centre - BOX_HALF_WIDTH, centre + BOX_HALF_WIDTH);
        let (cap_left, cap_right) = (centre - CAP_HALF_WIDTH, centre + CAP_HALF_WIDTH);
        let ink = theme.axis.stroke_width(2);

        fills.push(Rectangle::new(
            [(box_left, s.q1), (box_right, s.q3)],
            theme.month_color(slot).mix(0.8).filled(),
        ));
        outlines.push(Rectangle::new([(box_left, s.q1), (box_right, s.q3)], ink));

        strokes.push(PathElement::new(vec![(box_left, s.median), (box_right, s.median)], ink));
        strokes.push(PathElement::new(vec![(centre, s.q1), (centre, s.whisker_low)], ink));
        strokes.push(PathElement::new(vec![(centre, s.q3), (centre, s.whisker_high)], ink));
        strokes.push(PathElement::new(
            vec![(cap_left, s.whisker_low), (cap_right, s.whisker_low)],
            ink,
        ));
        strokes.push(PathElement::new(
            vec![(cap_left, s.whisker_high), (cap_right, s.whisker_high)],
            ink,
        ));

        outliers.extend(
            s.outliers
                .iter()
                .map(|v| Circle::new((centre, *v), OUTLIER_RADIUS, theme.axis.stroke_width(1))),
        );
    }

    chart.draw_series(fills)?;
    chart.draw_series(outlines)?;
    chart.draw_series(strokes)?;
    chart.draw_series(outliers)?;
    Ok(())
}
