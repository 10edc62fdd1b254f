//! Error types for workflow fixture operations.
//!
//! This module defines [`FixtureError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors (bad CLI argument, missing workflow, existing target
//!   file) are fatal to the generator and reported to the operator
//! - [`FixtureError::AssertionMismatch`] is reported per test case and carries
//!   the expected step plus the nearest trace entries
//! - [`FixtureError::ExecutionTimeout`] fails the test case; nothing retries it
//! - Use `anyhow::Error` (via `FixtureError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::assertion::AssertionMismatch;

/// Core error type for workflow fixture operations.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// No workflow file name was given to the generator.
    #[error("Please provide workflow file name")]
    MissingWorkflowArgument,

    /// The workflow file name does not look like `[workflow].yml`.
    #[error("Please provide a valid workflow file name ([workflow].yml) instead of {name}")]
    InvalidWorkflowFileName { name: String },

    /// The workflow file could not be found.
    #[error("Provided workflow file does not exist: {path}")]
    WorkflowNotFound { path: PathBuf },

    /// A generated file would overwrite an existing one.
    #[error("The {kind} file {path} already exists, exiting")]
    TargetExists { kind: String, path: PathBuf },

    /// Invalid run configuration (e.g. mocks for a job the workflow lacks).
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Failed to parse the tool's own configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Failed to parse a workflow definition.
    #[error("Failed to parse workflow {origin}: {message}")]
    WorkflowParse { origin: String, message: String },

    /// An expected step was missing from a trace, or an unexpected one present.
    #[error(transparent)]
    AssertionMismatch(Box<AssertionMismatch>),

    /// The workflow engine did not finish within the bound.
    #[error("Workflow execution timed out after {}s", timeout.as_secs())]
    ExecutionTimeout { timeout: Duration },

    /// The workflow engine could not be run or crashed.
    #[error("Workflow execution failed: {message}")]
    Execution { message: String },

    /// The throwaway repository could not be materialized.
    #[error("Failed to set up mock repository at {path}: {message}")]
    RepositorySetup { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FixtureError {
    /// Whether this error belongs to the configuration class.
    ///
    /// Configuration errors abort the generator before anything is written.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FixtureError::MissingWorkflowArgument
                | FixtureError::InvalidWorkflowFileName { .. }
                | FixtureError::WorkflowNotFound { .. }
                | FixtureError::TargetExists { .. }
                | FixtureError::Configuration { .. }
                | FixtureError::ConfigParse { .. }
        )
    }
}

impl From<AssertionMismatch> for FixtureError {
    fn from(mismatch: AssertionMismatch) -> Self {
        FixtureError::AssertionMismatch(Box::new(mismatch))
    }
}

/// Result type alias for workflow fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
