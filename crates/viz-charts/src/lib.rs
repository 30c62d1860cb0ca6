//! PNG rendering for the page-view visualizer.
//!
//! Provides the daily line chart, the monthly-mean bar chart and the
//! year/month box plots, each drawn with [`plotters`] onto a bitmap backend
//! from an already cleaned series.

pub mod bar;
pub mod boxplot;
mod layout;
pub mod line;
pub mod output;
pub mod themes;

use std::path::{Path, PathBuf};

use viz_core::error::Result;
use viz_core::settings::ChartKind;
use viz_data::cleaner::CleanedSeries;

pub use bar::draw_bar_plot;
pub use boxplot::draw_box_plot;
pub use line::draw_line_plot;
pub use viz_core as core;

/// Render every chart `kind` names into `out_dir`, returning the written
/// paths in render order.
pub fn draw_charts(
    kind: ChartKind,
    cleaned: &CleanedSeries,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for single in kind.expand() {
        let path = match single {
            ChartKind::Line => draw_line_plot(cleaned, out_dir)?,
            ChartKind::Bar => draw_bar_plot(cleaned, out_dir)?,
            ChartKind::Box => draw_box_plot(cleaned, out_dir)?,
            ChartKind::All => continue,
        };
        written.push(path);
    }
    Ok(written)
}
