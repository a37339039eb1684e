//! TSC Trace Report CLI
//!
//! Runs the TypeScript compiler and language server with tracing enabled,
//! then prints the slowest events and files from the generated trace.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use tsc_trace_report::commands::{execute_analyze, execute_collect, CollectArgs};
use tsc_trace_report::utils::config::{DEFAULT_PROJECT, DEFAULT_TRACE_DIR, DEFAULT_TSSERVER_SECONDS};

/// TSC Trace Report - type-checking performance summaries
#[derive(Parser, Debug)]
#[command(name = "tsc-trace-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Summarize an existing trace file or directory instead of collecting
    #[arg(long, value_name = "PATH")]
    analyze: Option<PathBuf>,

    /// TypeScript project file
    #[arg(long, default_value = DEFAULT_PROJECT)]
    project: PathBuf,

    /// Directory for diagnostics logs and trace output
    #[arg(long, default_value = DEFAULT_TRACE_DIR)]
    trace_dir: PathBuf,

    /// Seconds of tsserver logging to capture
    #[arg(
        long,
        default_value_t = DEFAULT_TSSERVER_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tsserver_seconds: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{}", error_message(&err));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Setup logging; stdout carries the report, so stay quiet by default
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Some(path) = cli.analyze {
        return execute_analyze(&path);
    }

    let args = CollectArgs {
        project: cli.project,
        trace_dir: cli.trace_dir,
        tsserver_window: Duration::from_secs(cli.tsserver_seconds),
    };

    execute_collect(&args)
}

/// One-line failure message with the cause chain
fn error_message(err: &anyhow::Error) -> String {
    format!("error: {:#}", err)
}
