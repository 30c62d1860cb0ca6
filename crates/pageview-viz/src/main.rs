mod bootstrap;

use std::path::PathBuf;

use anyhow::Result;
use viz_core::settings::Settings;
use viz_data::analysis::{prepare_data, AnalysisOptions};
use viz_data::reader::LoaderOptions;
use viz_data::summary::ChartSummary;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("pageview-viz v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Output: {}, Chart: {}",
        settings.data_file.display(),
        settings.output_dir.display(),
        settings.chart
    );

    for path in run(&settings)? {
        println!("{}", path.display());
    }

    Ok(())
}

/// Load, clean and render according to `settings`; returns every file written.
fn run(settings: &Settings) -> Result<Vec<PathBuf>> {
    let options = AnalysisOptions {
        loader: LoaderOptions {
            delimiter: settings.delimiter_byte()?,
        },
        bounds: settings.trim_bounds()?,
    };

    // The cleaned series is computed once and shared by every chart.
    let prepared = prepare_data(&settings.data_file, &options)?;

    let mut written =
        viz_charts::draw_charts(settings.chart, &prepared.cleaned, &settings.output_dir)?;

    if let Some(summary_path) = &settings.summary {
        ChartSummary::build(&prepared).write_to(summary_path)?;
        written.push(summary_path.clone());
    }

    tracing::info!("Finished: {} file(s) written", written.len());
    Ok(written)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
