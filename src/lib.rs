//! TSC Trace Report
//!
//! Collects performance traces from the TypeScript compiler and language
//! server, and summarizes them into ranked duration reports.
//!
//! The two building blocks are independent:
//! - [`parser`] + [`aggregator`]: stream a trace array from disk and fold
//!   each event into per-name and per-file duration totals
//! - [`capture`]: run an external program with its output captured to a
//!   file, optionally stopping it after a fixed window
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install tsc-trace-report
//! tsc-trace-report --analyze .type-analysis/tsc-trace.json
//! ```

pub mod aggregator;
pub mod capture;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
