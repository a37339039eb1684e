//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default directory for collected diagnostics and traces
pub const DEFAULT_TRACE_DIR: &str = ".type-analysis";

/// Default TypeScript project file
pub const DEFAULT_PROJECT: &str = "tsconfig.json";

// Files written under the trace directory
pub const TSC_OUTPUT: &str = "tsc-extended.log";
pub const TRACE_JSON: &str = "tsc-trace.json";
pub const TSSERVER_LOG: &str = "tsserver.log";
pub const TSSERVER_STDOUT: &str = "tsserver.stdout";
pub const TSSERVER_TRACES: &str = "tsserver-traces";

/// File the compiler writes inside the trace JSON directory
pub const TRACE_FILE_NAME: &str = "trace.json";

/// How long the language server log is captured by default
pub const DEFAULT_TSSERVER_SECONDS: u64 = 30;
pub const DEFAULT_TSSERVER_WINDOW: Duration = Duration::from_secs(DEFAULT_TSSERVER_SECONDS);

/// Suffix of trace sources picked up when walking a directory
pub const TRACE_FILE_SUFFIX: &str = ".json";

/// Maximum entries shown per report section
pub const REPORT_LIMIT: usize = 20;

/// Bucket for events with no name
pub const UNKNOWN_EVENT_NAME: &str = "unknown";

// Attribute keys probed for file attribution, highest priority first
pub const FILE_ATTRIBUTION_KEYS: &[&str] = &["path", "fileName", "containingFileName", "configFilePath"];

/// Launcher used for the compiler and the language server
pub const NPX: &str = "npx";
