//! JSON export of the data behind every chart.

use std::path::Path;

use serde::Serialize;
use tracing::info;
use viz_core::error::{Result, VizError};
use viz_core::stats::{BoxStats, TrimBounds};

use crate::aggregator::{distribution_groups, monthly_means, MonthlyMeanTable};
use crate::analysis::{AnalysisMetadata, PreparedData};
use crate::cleaner::Thresholds;

/// Box statistics for one labelled group; `stats` is `None` for an empty group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub stats: Option<BoxStats>,
}

/// Everything the three charts are drawn from.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub metadata: AnalysisMetadata,
    pub bounds: TrimBounds,
    pub thresholds: Option<Thresholds>,
    /// Number of points on the line chart.
    pub line_points: usize,
    pub monthly_means: MonthlyMeanTable,
    pub yearly_boxes: Vec<GroupSummary>,
    pub monthly_boxes: Vec<GroupSummary>,
}

impl ChartSummary {
    pub fn build(prepared: &PreparedData) -> Self {
        let series = &prepared.cleaned.series;
        let groups = distribution_groups(series);

        Self {
            metadata: prepared.metadata.clone(),
            bounds: prepared.cleaned.bounds,
            thresholds: prepared.cleaned.thresholds,
            line_points: series.len(),
            monthly_means: monthly_means(series),
            yearly_boxes: groups
                .by_year
                .iter()
                .map(|g| GroupSummary {
                    label: g.label.to_string(),
                    stats: g.summary(),
                })
                .collect(),
            monthly_boxes: groups
                .by_month
                .iter()
                .map(|g| GroupSummary {
                    label: g.label.abbrev().to_string(),
                    stats: g.summary(),
                })
                .collect(),
        }
    }

    /// Write the summary as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| VizError::OutputWrite {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        std::fs::write(path, json).map_err(|e| VizError::OutputWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!("Wrote chart summary to {}", path.display());
        Ok(())
    }
}
