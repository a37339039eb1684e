//! Aggregation of trace events into ranked duration totals.
//!
//! This module turns decoded trace events into:
//! - Cumulative durations per event name
//! - Cumulative durations per attributed source file
//! - Ranked top-N lists for reporting

pub mod ranking;
pub mod summary;

// Re-export main types and functions
pub use ranking::{rank_entries, RankedEntry};
pub use summary::Summary;
