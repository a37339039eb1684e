//! Output writers for trace summaries.
//!
//! Reports are human-readable text written to stdout (or any writer in
//! tests). Nothing here is meant to be parsed back.

pub mod report;

// Re-export main functions
pub use report::{print_report, write_report};
