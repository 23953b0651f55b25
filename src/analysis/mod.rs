//! Aggregation and reporting of per-entity averages.
//!
//! This module provides:
//! - Per-entity running totals merged across images
//! - The sorted average report printed to stdout
//! - JSON export and a bar chart of the report

pub mod aggregate;
pub mod charts;
pub mod export;
pub mod report;

pub use aggregate::Aggregator;
pub use report::Report;

use anyhow::Result;
use std::path::Path;

/// Writes the optional report outputs requested on the command line.
pub fn write_outputs(report: &Report, json_path: Option<&Path>, chart_path: Option<&Path>) -> Result<()> {
    if let Some(path) = json_path {
        export::export_to_json(report, path)?;
        crate::log(&format!("Report JSON saved: {}", path.display()));
    }

    if let Some(path) = chart_path {
        if report.is_empty() {
            crate::log("No entities resolved, skipping chart");
        } else {
            charts::generate_average_chart(report, path)?;
            crate::log(&format!("Chart saved: {}", path.display()));
        }
    }

    Ok(())
}
