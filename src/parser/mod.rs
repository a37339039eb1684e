//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Streaming trace arrays from disk without loading them whole
//! - Walking trace directories
//! - Defining the event schema and file attribution rule

pub mod schema;
pub mod stream;

// Re-export main types
pub use schema::{FileAttributes, TraceEvent};
pub use stream::{load, load_into, process_file, process_reader};
