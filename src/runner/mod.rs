//! Workflow execution seam.
//!
//! The crate does not execute workflows itself. A [`WorkflowRunner`] runs
//! one event against a workflow with mocked steps and reports the
//! [`ExecutionTrace`]. [`ActRunner`] drives the `act` binary; tests can
//! plug in any in-process fake.

pub mod act;
pub mod act_output;
pub mod options;

pub use act::ActRunner;
pub use act_output::parse_trace;
pub use options::RunOptions;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::{FixtureError, Result};
use crate::step::ExecutionTrace;

/// Default upper bound on one run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Executes a workflow for an event and reports what ran.
pub trait WorkflowRunner {
    /// Run `event` and block until the trace is complete.
    ///
    /// # Errors
    ///
    /// `Configuration` for mocks that do not fit the workflow,
    /// `ExecutionTimeout` past `options.timeout`, `Execution` if the engine
    /// cannot run.
    fn run_event(&self, event: &str, options: &RunOptions) -> Result<ExecutionTrace>;
}

/// Run `f` on a worker thread, giving up after `timeout`.
///
/// On expiry the worker is left to finish on its own and its result is
/// discarded; the caller gets `ExecutionTimeout` and no partial result.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use workflow_fixtures::runner::run_with_timeout;
/// use workflow_fixtures::FixtureError;
///
/// let ok = run_with_timeout(Duration::from_secs(1), || Ok(42));
/// assert_eq!(ok.unwrap(), 42);
///
/// let slow = run_with_timeout(Duration::from_millis(10), || {
///     std::thread::sleep(Duration::from_millis(500));
///     Ok(())
/// });
/// assert!(matches!(slow, Err(FixtureError::ExecutionTimeout { .. })));
/// ```
pub fn run_with_timeout<T, F>(timeout: Duration, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("workflow-run".to_string())
        .spawn(move || {
            let _ = tx.send(f());
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!("Workflow run exceeded {:?}", timeout);
            Err(FixtureError::ExecutionTimeout { timeout })
        }
        Err(RecvTimeoutError::Disconnected) => Err(FixtureError::Execution {
            message: "workflow run panicked".to_string(),
        }),
    }
}

/// Timestamped log path for one run of a workflow.
///
/// ```
/// use std::path::Path;
/// use workflow_fixtures::runner::log_file_path;
///
/// let path = log_file_path(Path::new("logs"), "deploy");
/// assert!(path.starts_with("logs/deploy"));
/// assert_eq!(path.extension().and_then(|e| e.to_str()), Some("log"));
/// ```
pub fn log_file_path(logs_dir: &Path, workflow_name: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    logs_dir
        .join(workflow_name)
        .join(format!("{}.log", stamp))
}
