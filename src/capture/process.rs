//! Run external programs with their output captured to a file.
//!
//! Two flavors:
//! - [`run_to_completion`] waits for the program to exit on its own
//! - [`run_with_deadline`] stops the program once a time window elapses
//!
//! In both cases stdout and stderr go to the same freshly truncated file
//! and stdin is inherited. The output file is closed in the parent as soon
//! as the child is spawned; the child's copy closes when it exits.

use crate::utils::error::CaptureError;
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// How a deadline-bounded run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The program exited before the deadline
    Exited(ExitStatus),

    /// The deadline fired and the program was killed and reaped
    TimedOut,
}

impl CaptureOutcome {
    pub fn timed_out(&self) -> bool {
        matches!(self, CaptureOutcome::TimedOut)
    }
}

/// Resolve a program name to the executable that will be spawned
///
/// **Public** - called before anything is spawned
///
/// Names containing a path separator are used as-is. Bare names are
/// searched for in `PATH`.
///
/// # Errors
/// * `CaptureError::NotFound` - No executable with that name in `PATH`
pub fn resolve_executable(program: &str) -> Result<PathBuf, CaptureError> {
    if program.chars().any(std::path::is_separator) {
        return Ok(PathBuf::from(program));
    }

    let resolved = which::which(program).map_err(|_| CaptureError::NotFound {
        program: program.to_string(),
    })?;
    debug!("Resolved {} to {}", program, resolved.display());
    Ok(resolved)
}

/// Run a program until it exits on its own
///
/// **Public** - used for one-shot tools
///
/// # Arguments
/// * `program` - Executable name or path
/// * `args` - Arguments passed to the program
/// * `output` - File receiving stdout and stderr (truncated first)
///
/// # Returns
/// The program's exit status. A non-zero status is not an error here;
/// callers decide what it means.
///
/// # Errors
/// * `CaptureError::NotFound` - The executable could not be resolved
/// * `CaptureError::Output` - The output file could not be created
/// * `CaptureError::Spawn` - The program could not be started
/// * `CaptureError::Wait` - Waiting for the program failed
pub fn run_to_completion<I, S>(
    program: &str,
    args: I,
    output: impl AsRef<Path>,
) -> Result<ExitStatus, CaptureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = spawn_redirected(program, args, output.as_ref())?;
    let status = child.wait().map_err(CaptureError::Wait)?;
    debug!("{} exited with {}", program, status);
    Ok(status)
}

/// Run a program for at most `deadline`
///
/// **Public** - used to capture a time window of a long-running server
///
/// If the program is still running when the deadline fires it is killed,
/// and the call does not return until the kill has been observed. Hitting
/// the deadline is a successful [`CaptureOutcome::TimedOut`], not an error.
///
/// Reaping after the kill is best effort: if that final wait fails the
/// failure is logged and `TimedOut` is still returned.
///
/// # Errors
/// Same as [`run_to_completion`]. `CaptureError::Wait` is only returned if
/// the bounded wait itself fails.
pub fn run_with_deadline<I, S>(
    program: &str,
    args: I,
    output: impl AsRef<Path>,
    deadline: Duration,
) -> Result<CaptureOutcome, CaptureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = spawn_redirected(program, args, output.as_ref())?;

    match child.wait_timeout(deadline).map_err(CaptureError::Wait)? {
        Some(status) => {
            debug!("{} exited with {} before the deadline", program, status);
            Ok(CaptureOutcome::Exited(status))
        }
        None => {
            info!("Stopping {} after {:?}", program, deadline);
            terminate(&mut child);
            Ok(CaptureOutcome::TimedOut)
        }
    }
}

/// Kill a child and wait until its exit is observed
///
/// **Private** - internal helper for run_with_deadline
fn terminate(child: &mut Child) {
    // Fails if the child exited between the timeout and the kill; the wait
    // below still reaps it.
    if let Err(e) = child.kill() {
        debug!("Kill of pid {} failed: {}", child.id(), e);
    }

    if let Err(e) = child.wait() {
        warn!("Failed to reap pid {} after kill: {}", child.id(), e);
    }
}

/// Resolve, open the output file, and spawn with stdout/stderr redirected
///
/// **Private** - shared by both run flavors
fn spawn_redirected<I, S>(program: &str, args: I, output: &Path) -> Result<Child, CaptureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let executable = resolve_executable(program)?;

    let stdout = File::create(output).map_err(|source| CaptureError::Output {
        path: output.to_path_buf(),
        source,
    })?;
    let stderr = stdout.try_clone().map_err(|source| CaptureError::Output {
        path: output.to_path_buf(),
        source,
    })?;

    let child = Command::new(&executable)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .map_err(|source| CaptureError::Spawn {
            program: program.to_string(),
            source,
        })?;

    debug!(
        "Spawned {} (pid {}), output to {}",
        executable.display(),
        child.id(),
        output.display()
    );
    Ok(child)
}
