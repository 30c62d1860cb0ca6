use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::stats::TrimBounds;

// ── ChartKind ──────────────────────────────────────────────────────────────────

/// Which chart(s) a run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Box,
    All,
}

impl ChartKind {
    /// The concrete charts this selection expands to, in drawing order.
    pub fn expand(self) -> &'static [ChartKind] {
        match self {
            ChartKind::Line => &[ChartKind::Line],
            ChartKind::Bar => &[ChartKind::Bar],
            ChartKind::Box => &[ChartKind::Box],
            ChartKind::All => &[ChartKind::Line, ChartKind::Bar, ChartKind::Box],
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Box => write!(f, "box"),
            ChartKind::All => write!(f, "all"),
        }
    }
}

/// Shown under `--help`: text on the charts is a build-time option.
pub const TEXT_FEATURE_NOTE: &str = "Chart titles, axis labels and the month legend are drawn only when \
     built with `--features ttf` (needs system fonts); other builds draw \
     the data and bare axes.";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Clean daily forum page views and render line, bar and box charts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pageview-viz",
    about = "Clean daily forum page views and render line, bar and box charts",
    after_help = TEXT_FEATURE_NOTE,
    version
)]
pub struct Settings {
    /// Delimited file with `date` and `value` columns
    #[arg(long, default_value = "data/fcc-forum-pageviews.csv")]
    pub data_file: PathBuf,

    /// Directory the PNG charts are written to (created if missing)
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Chart to draw
    #[arg(long, value_enum, default_value_t = ChartKind::All)]
    pub chart: ChartKind,

    /// Lower quantile below which values are dropped
    #[arg(long, default_value_t = TrimBounds::DEFAULT_LOWER)]
    pub lower_quantile: f64,

    /// Upper quantile above which values are dropped
    #[arg(long, default_value_t = TrimBounds::DEFAULT_UPPER)]
    pub upper_quantile: f64,

    /// Field delimiter of the data file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Also write the data behind every chart as JSON to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Validated quantile bounds for the cleaner.
    pub fn trim_bounds(&self) -> Result<TrimBounds> {
        TrimBounds::new(self.lower_quantile, self.upper_quantile)
    }

    /// The delimiter as a single byte; only ASCII delimiters are supported.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(crate::error::VizError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
