//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading trace data
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk trace directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("trace file {} is not an array", path.display())]
    NotAnArray { path: PathBuf },

    #[error("invalid trace event in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while running an external program
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("executable {program:?} not found in PATH")]
    NotFound { program: String },

    #[error("failed to create output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),
}
