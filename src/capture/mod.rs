//! Bounded external process capture.
//!
//! Launches the compiler and language server with their combined output
//! redirected to a file, optionally stopping them after a fixed window.

pub mod process;

pub use process::{resolve_executable, run_to_completion, run_with_deadline, CaptureOutcome};
