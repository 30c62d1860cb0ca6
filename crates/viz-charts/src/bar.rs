//! Mean daily page views per month, grouped by year.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;
use viz_core::error::Result;
use viz_core::models::CalendarMonth;
use viz_core::settings::ChartKind;
use viz_data::aggregator::{monthly_means, MonthlyMeanTable};
use viz_data::cleaner::CleanedSeries;

use crate::layout::{category_label, category_tick_count, draw_plain_axes, zero_based_range};
use crate::output::{prepare_target, render_error};
use crate::themes::{ChartTheme, FONT_FAMILY};

/// Share of each year's slot left empty between neighbouring groups.
const GROUP_GAP: f64 = 0.1;

/// Horizontal extent `(left, right)` of the bar for `month` in the group at
/// `group`. Each year owns the slot `[group, group + 1)`.
pub fn bar_extent(group: usize, month: CalendarMonth) -> (f64, f64) {
    let width = (1.0 - 2.0 * GROUP_GAP) / 12.0;
    let left = group as f64 + GROUP_GAP + month.index() as f64 * width;
    (left, left + width)
}

/// Render `bar_plot.png` into `out_dir` and return its path.
pub fn draw_bar_plot(cleaned: &CleanedSeries, out_dir: &Path) -> Result<PathBuf> {
    draw_bar_plot_with(cleaned, out_dir, &ChartTheme::bar())
}

pub fn draw_bar_plot_with(
    cleaned: &CleanedSeries,
    out_dir: &Path,
    theme: &ChartTheme,
) -> Result<PathBuf> {
    let path = prepare_target(out_dir, ChartKind::Bar)?;
    let table = monthly_means(&cleaned.series);

    {
        let root = BitMapBackend::new(&path, (theme.width, theme.height)).into_drawing_area();
        render_bars(&root, &table, theme)
            .and_then(|_| root.present())
            .map_err(|e| render_error(&path, e))?;
    }

    info!("Wrote {} ({} years)", path.display(), table.years.len());
    Ok(path)
}

fn render_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &MonthlyMeanTable,
    theme: &ChartTheme,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&theme.background)?;

    let x_range = 0.0..table.years.len().max(1) as f64;
    let y_range = zero_based_range(table.max_value());
    let labels: Vec<String> = table.years.iter().map(|y| y.to_string()).collect();

    let (x_area, y_area) = theme.label_areas();
    let mut chart = ChartBuilder::on(root)
        .margin(theme.margin)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    if theme.text_enabled {
        let year_label = |x: &f64| category_label(&labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Years")
            .y_desc("Average Page Views")
            .x_labels(category_tick_count(labels.len()))
            .x_label_formatter(&year_label)
            .label_style((FONT_FAMILY, theme.label_size))
            .axis_desc_style((FONT_FAMILY, theme.label_size))
            .draw()?;

        // Heading row for the legend.
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
            .label("Months")
            .legend(|(x, y)| Rectangle::new([(x, y), (x + 1, y + 1)], TRANSPARENT.filled()));
    } else {
        draw_plain_axes(&mut chart, &x_range, &y_range, theme.axis)?;
    }

    for month in CalendarMonth::ALL {
        let color = theme.month_color(month.index());
        let bars: Vec<Rectangle<(f64, f64)>> = table
            .years
            .iter()
            .enumerate()
            .filter_map(|(group, year)| {
                let mean = table.get(*year, month)?;
                let (left, right) = bar_extent(group, month);
                Some(Rectangle::new([(left, 0.0), (right, mean)], color.filled()))
            })
            .collect();

        let series = chart.draw_series(bars)?;
        if theme.text_enabled {
            series
                .label(month.name())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
                });
        }
    }

    if theme.text_enabled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(theme.axis)
            .label_font((FONT_FAMILY, theme.label_size))
            .draw()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleaned_sample, png_size};
    use tempfile::TempDir;
    use viz_core::models::Series;
    use viz_data::cleaner::clean;

    #[test]
    fn test_bar_extent_stays_inside_group() {
        for group in 0..4 {
            let (first_left, _) = bar_extent(group, CalendarMonth::January);
            let (_, last_right) = bar_extent(group, CalendarMonth::December);
            assert!(first_left > group as f64);
            assert!(last_right < (group + 1) as f64);
        }
    }

    #[test]
    fn test_bar_extent_months_do_not_overlap() {
        let mut previous_right = f64::MIN;
        for month in CalendarMonth::ALL {
            let (left, right) = bar_extent(2, month);
            assert!(left >= previous_right - 1e-12);
            assert!(right > left);
            previous_right = right;
        }
    }

    #[test]
    fn test_draw_bar_plot_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = draw_bar_plot(&cleaned_sample(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("bar_plot.png"));
        assert_eq!(png_size(&path), (1500, 1000));
    }

    #[test]
    fn test_draw_bar_plot_overwrites() {
        let dir = TempDir::new().unwrap();
        let cleaned = cleaned_sample();

        draw_bar_plot(&cleaned, dir.path()).unwrap();
        let path = draw_bar_plot(&cleaned, dir.path()).unwrap();
        assert_eq!(png_size(&path), (1500, 1000));
    }

    #[test]
    fn test_draw_bar_plot_empty_series() {
        let dir = TempDir::new().unwrap();
        let path = draw_bar_plot(&clean(&Series::default()), dir.path()).unwrap();
        assert!(path.exists());
    }
}
