//! Analyze command implementation.
//!
//! Summarizes trace data that is already on disk.

use crate::output::print_report;
use crate::parser::load;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(path: &Path) -> Result<()> {
    println!("Analyzing existing trace data --> {}", path.display());
    print_trace_summary(path)
}

/// Load a trace file or directory and print its summary
///
/// **Public** - shared with the collect command
///
/// A trace that cannot be loaded is reported on stderr and is not an error:
/// the run itself succeeded, there is just nothing to summarize. Only a
/// failure to write the report is returned.
pub fn print_trace_summary(path: &Path) -> Result<()> {
    let start_time = Instant::now();

    let summary = match load(path) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("failed to analyze trace: {}", e);
            return Ok(());
        }
    };

    info!(
        "Loaded {} events ({} names, {} files) in {:.2}s",
        summary.event_count(),
        summary.durations_by_name().len(),
        summary.durations_by_file().len(),
        start_time.elapsed().as_secs_f64()
    );

    print_report(&summary).context("Failed to write trace summary")?;
    Ok(())
}
