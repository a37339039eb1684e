//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod collect;
pub mod models;

// Re-export main command functions
pub use analyze::{execute_analyze, print_trace_summary};
pub use collect::{execute_collect, locate_trace_data};
pub use models::CollectArgs;
