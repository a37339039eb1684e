use crate::utils::config::{
    DEFAULT_PROJECT, DEFAULT_TRACE_DIR, DEFAULT_TSSERVER_WINDOW, TRACE_JSON, TSC_OUTPUT,
    TSSERVER_LOG, TSSERVER_STDOUT, TSSERVER_TRACES,
};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the collect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CollectArgs {
    /// TypeScript project passed to the compiler
    pub project: PathBuf,

    /// Directory receiving logs and traces
    pub trace_dir: PathBuf,

    /// How long the language server runs before it is stopped
    pub tsserver_window: Duration,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            project: PathBuf::from(DEFAULT_PROJECT),
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            tsserver_window: DEFAULT_TSSERVER_WINDOW,
        }
    }
}

// Paths under the trace directory
impl CollectArgs {
    pub fn diagnostics_log(&self) -> PathBuf {
        self.trace_dir.join(TSC_OUTPUT)
    }

    pub fn trace_json_dir(&self) -> PathBuf {
        self.trace_dir.join(TRACE_JSON)
    }

    pub fn tsserver_log(&self) -> PathBuf {
        self.trace_dir.join(TSSERVER_LOG)
    }

    pub fn tsserver_stdout(&self) -> PathBuf {
        self.trace_dir.join(TSSERVER_STDOUT)
    }

    pub fn tsserver_traces(&self) -> PathBuf {
        self.trace_dir.join(TSSERVER_TRACES)
    }
}
