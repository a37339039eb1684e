//! Collect command implementation.
//!
//! The collect command:
//! 1. Runs the compiler with extended diagnostics and trace generation
//! 2. Captures a fixed window of language server logging
//! 3. Summarizes the generated trace data

use super::analyze::print_trace_summary;
use super::models::CollectArgs;
use crate::capture::{run_to_completion, run_with_deadline};
use crate::utils::config::{NPX, TRACE_FILE_NAME, TRACE_JSON};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the collect command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * The trace directory cannot be created
/// * `npx` cannot be found or started
/// * Previous outputs cannot be removed
pub fn execute_collect(args: &CollectArgs) -> Result<()> {
    let start_time = Instant::now();

    std::fs::create_dir_all(&args.trace_dir).with_context(|| {
        format!("Failed to create trace directory {}", args.trace_dir.display())
    })?;

    println!(
        "1/3 Running `npx tsc` diagnostics + trace with {}...",
        args.project.display()
    );
    run_tsc(args).context("Failed to run tsc")?;

    println!(
        "2/3 Capturing tsserver log ({}s)...",
        args.tsserver_window.as_secs()
    );
    capture_tsserver(args).context("Failed to capture tsserver log")?;

    let trace_data = locate_trace_data(&args.trace_dir);

    println!("3/3 Summaries:");
    println!("  • Project: {}", args.project.display());
    println!("  • Diagnostics log: {}", args.diagnostics_log().display());
    println!("  • Trace data: {}", trace_data.display());
    println!("  • tsserver log: {}", args.tsserver_log().display());
    println!("  • tsserver stdout: {}", args.tsserver_stdout().display());

    print_trace_summary(&trace_data)?;

    info!("Collect completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Find the trace data the compiler produced
///
/// **Public** - prefers `<dir>/tsc-trace.json/trace.json`, falling back to
/// the `tsc-trace.json` directory itself (loaded as a directory walk)
pub fn locate_trace_data(trace_dir: &Path) -> PathBuf {
    let json_dir = trace_dir.join(TRACE_JSON);
    let trace_file = json_dir.join(TRACE_FILE_NAME);
    if trace_file.exists() {
        trace_file
    } else {
        json_dir
    }
}

/// Run the compiler to completion
///
/// **Private** - step 1 of collect
fn run_tsc(args: &CollectArgs) -> Result<()> {
    let output = args.diagnostics_log();
    let json_dir = args.trace_json_dir();

    remove_stale(&json_dir)?;
    remove_stale(&output)?;
    std::fs::create_dir_all(&json_dir)
        .with_context(|| format!("Failed to create {}", json_dir.display()))?;

    let tsc_args: Vec<OsString> = vec![
        "tsc".into(),
        "--project".into(),
        args.project.clone().into(),
        "--extendedDiagnostics".into(),
        "--traceResolution".into(),
        "--generateTrace".into(),
        json_dir.join(TRACE_FILE_NAME).into(),
    ];

    let status = run_to_completion(NPX, tsc_args, &output)?;
    if !status.success() {
        // tsc exits non-zero whenever the project has type errors
        warn!("tsc exited with {}; see {}", status, output.display());
    }

    Ok(())
}

/// Run the language server for the configured window
///
/// **Private** - step 2 of collect
fn capture_tsserver(args: &CollectArgs) -> Result<()> {
    let stdout_path = args.tsserver_stdout();
    let log_path = args.tsserver_log();
    remove_stale(&stdout_path)?;
    remove_stale(&log_path)?;

    let tsserver_args: Vec<OsString> = vec![
        "tsserver".into(),
        "--logVerbosity".into(),
        "verbose".into(),
        "--logFile".into(),
        log_path.into(),
        "--traceDirectory".into(),
        args.tsserver_traces().into(),
    ];

    let outcome = run_with_deadline(NPX, tsserver_args, &stdout_path, args.tsserver_window)?;
    if outcome.timed_out() {
        info!("tsserver stopped after {}s", args.tsserver_window.as_secs());
    } else {
        warn!("tsserver ended before the capture window closed: {:?}", outcome);
    }

    Ok(())
}

/// Remove a file or directory left by a previous run
///
/// **Private** - a missing path is fine
fn remove_stale(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_trace_data_prefers_trace_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let json_dir = temp_dir.path().join("tsc-trace.json");
        std::fs::create_dir_all(&json_dir).unwrap();
        std::fs::write(json_dir.join("trace.json"), "[]").unwrap();

        assert_eq!(locate_trace_data(temp_dir.path()), json_dir.join("trace.json"));
    }

    #[test]
    fn test_locate_trace_data_falls_back_to_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(
            locate_trace_data(temp_dir.path()),
            temp_dir.path().join("tsc-trace.json")
        );
    }

    #[test]
    fn test_remove_stale_missing_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(remove_stale(&temp_dir.path().join("nothing-here")).is_ok());
    }

    #[test]
    fn test_remove_stale_file_and_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("tsserver.log");
        let dir = temp_dir.path().join("tsc-trace.json");
        std::fs::write(&file, "old").unwrap();
        std::fs::create_dir_all(dir.join("nested")).unwrap();

        remove_stale(&file).unwrap();
        remove_stale(&dir).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_collect_args_paths() {
        let args = CollectArgs {
            trace_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(args.diagnostics_log(), PathBuf::from("out/tsc-extended.log"));
        assert_eq!(args.tsserver_traces(), PathBuf::from("out/tsserver-traces"));
        assert_eq!(args.tsserver_window.as_secs(), 30);
    }
}
