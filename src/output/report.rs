//! Plain-text summary report.
//!
//! Writes the ranked event and file sections of a [`Summary`]:
//!
//! ```text
//! === Top event durations (2 items) ===
//!    1234.50 ms  checkSourceFile
//!      17.25 ms  bindSourceFile
//! ```

use crate::aggregator::{rank_entries, Summary};
use crate::utils::config::REPORT_LIMIT;
use std::collections::HashMap;
use std::io::{self, Write};

pub const EVENTS_SECTION_TITLE: &str = "Top event durations";
pub const FILES_SECTION_TITLE: &str = "Top files by aggregated duration";
pub const NO_EVENTS_NOTICE: &str = "no events found in trace data";

/// Write the summary report
///
/// **Public** - main entry point for report output
///
/// An empty summary produces only the "no events found" notice. Otherwise
/// the event section is always written and the file section only when at
/// least one event was attributed to a file.
pub fn write_report<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    if summary.is_empty() {
        writeln!(out, "{NO_EVENTS_NOTICE}")?;
        return Ok(());
    }

    write_section(out, EVENTS_SECTION_TITLE, summary.durations_by_name(), REPORT_LIMIT)?;

    if !summary.durations_by_file().is_empty() {
        write_section(out, FILES_SECTION_TITLE, summary.durations_by_file(), REPORT_LIMIT)?;
    }

    Ok(())
}

/// Write the summary report to stdout
pub fn print_report(summary: &Summary) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(summary, &mut out)?;
    out.flush()
}

/// Write one ranked section; the header counts the rows actually shown
///
/// **Private** - internal helper for write_report
fn write_section<W: Write>(
    out: &mut W,
    title: &str,
    totals: &HashMap<String, f64>,
    limit: usize,
) -> io::Result<()> {
    let entries = rank_entries(totals, limit);

    writeln!(out)?;
    writeln!(out, "=== {} ({} items) ===", title, entries.len())?;
    for entry in &entries {
        writeln!(out, "{:>10.2} ms  {}", entry.total, entry.key)?;
    }

    Ok(())
}
