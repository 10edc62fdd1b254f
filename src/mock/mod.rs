//! Mock step synthesis.
//!
//! A [`MockStep`] declares the call a workflow step is expected to make
//! (name, job, parameter keys) and the canned result an engine should
//! substitute for the real execution. [`MockSteps`] groups them per job for
//! one run.
//!
//! Failure cascading (skipping steps gated on success, running failure-path
//! steps) belongs to the engine; a mock only supplies its terminal status.

pub mod step;
pub mod steps;

pub use step::{input_env_name, MockStep};
pub use steps::MockSteps;
