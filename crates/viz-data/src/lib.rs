//! Data layer for the page-view visualizer.
//!
//! Loads the delimited source file into a date-indexed series, trims
//! outliers against frozen quantile thresholds, builds the aggregates each
//! chart consumes and runs the top-level load-and-clean pipeline.

pub mod aggregator;
pub mod analysis;
pub mod cleaner;
pub mod reader;
pub mod summary;

pub use viz_core as core;
