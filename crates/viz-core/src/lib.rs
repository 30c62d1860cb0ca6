//! Core types for the page-view visualizer.
//!
//! Holds the record/series model, calendar months, quantile and box-plot
//! statistics, date parsing, CLI settings and the shared error type. No I/O
//! beyond argument parsing happens here.

pub mod dates;
pub mod error;
pub mod models;
pub mod settings;
pub mod stats;

pub use error::{Result, VizError};
