//! Workflow fixtures: mocks, assertions and test scaffolds for CI workflows.
//!
//! A workflow definition (a YAML graph of jobs, each an ordered list of
//! steps) is parsed into a [`workflow::WorkflowGraph`]. From it the crate
//! generates mock steps with deterministic output, trace assertions, and a
//! test skeleton. At test time the mocks go to a [`runner::WorkflowRunner`],
//! and the returned [`step::ExecutionTrace`] is checked with [`assertion`].
//!
//! # Modules
//!
//! - [`assertion`] - Trace containment checks with nearest-entry diagnostics
//! - [`cli`] - The `wfx` generator command
//! - [`config`] - `.wfx/config.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`mock`] - Mock step descriptors and per-job mock sets
//! - [`repo`] - Throwaway repositories for runs
//! - [`runner`] - Engine seam, timeouts and the `act` adapter
//! - [`scaffold`] - Generated mocks, assertions and test skeletons
//! - [`secrets`] - Secret detection and output masking
//! - [`step`] - Step identity, parameters and trace records
//! - [`ui`] - Terminal output
//! - [`workflow`] - Workflow YAML parsing
//!
//! # Example
//!
//! ```
//! use workflow_fixtures::assertion::assert_present;
//! use workflow_fixtures::mock::MockStep;
//! use workflow_fixtures::step::{ExecutionTrace, StepIdentity, StepParams};
//!
//! let mock = MockStep::new("Checkout", "Checking out", Some("validate"), &["token"], &[]);
//! let mut inputs = StepParams::new();
//! inputs.push("token", "***");
//!
//! let trace = ExecutionTrace::new(mock.simulate(&inputs, &StepParams::new()).into_iter().collect());
//! let expected = StepIdentity::new("Checkout", Some("validate"), "Checking out")
//!     .with_inputs([("token", "***")]);
//! assert!(assert_present(&trace, &expected).is_ok());
//! ```

pub mod assertion;
pub mod cli;
pub mod config;
pub mod error;
pub mod mock;
pub mod repo;
pub mod runner;
pub mod scaffold;
pub mod secrets;
pub mod step;
pub mod ui;
pub mod workflow;

pub use error::{FixtureError, Result};
