//! Output locations for rendered charts.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use viz_core::error::{Result, VizError};
use viz_core::settings::ChartKind;

pub const LINE_PLOT_FILE: &str = "line_plot.png";
pub const BAR_PLOT_FILE: &str = "bar_plot.png";
pub const BOX_PLOT_FILE: &str = "box_plot.png";

/// File name a single chart kind is written to; `None` for [`ChartKind::All`].
pub fn chart_file_name(kind: ChartKind) -> Option<&'static str> {
    match kind {
        ChartKind::Line => Some(LINE_PLOT_FILE),
        ChartKind::Bar => Some(BAR_PLOT_FILE),
        ChartKind::Box => Some(BOX_PLOT_FILE),
        ChartKind::All => None,
    }
}

/// Create `dir` and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| VizError::OutputWrite {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Path `kind` is written to inside `dir`, after making sure `dir` exists.
pub(crate) fn prepare_target(dir: &Path, kind: ChartKind) -> Result<PathBuf> {
    let file = chart_file_name(kind).ok_or_else(|| {
        VizError::Config(format!("`{}` names several charts, not one file", kind))
    })?;
    ensure_output_dir(dir)?;
    Ok(dir.join(file))
}

pub(crate) fn render_error(path: &Path, err: impl Display) -> VizError {
    VizError::OutputWrite {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
