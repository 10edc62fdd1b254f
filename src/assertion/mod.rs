//! Trace assertions.
//!
//! Assertions check containment, not equality: a trace may hold any number
//! of unrelated steps in any order. A step matches a trace entry when name,
//! job id, message, ordered inputs, ordered envs and status all agree.
//!
//! If the same step occurs more than once in a trace, any occurrence
//! satisfies [`assert_present`]. Asserting an exact number of occurrences
//! is not supported; [`count_matches`] exposes the raw count.
//!
//! # Example
//!
//! ```
//! use workflow_fixtures::assertion::{assert_absent, assert_present};
//! use workflow_fixtures::step::{ExecutionTrace, StepIdentity};
//!
//! let checkout = StepIdentity::new("Checkout", Some("VALIDATE"), "Checkout");
//! let trace: ExecutionTrace = checkout.to_trace_step().into_iter().collect();
//!
//! assert!(assert_present(&trace, &checkout).is_ok());
//! assert!(assert_absent(&trace, &checkout.clone().failed()).is_ok());
//! ```

pub mod mismatch;

pub use mismatch::{AssertionMismatch, MismatchKind, NearestEntry, NEAREST_LIMIT};

use crate::step::{ExecutionTrace, StepIdentity};

/// Succeeds iff some trace entry matches `expected`.
pub fn assert_present(
    trace: &ExecutionTrace,
    expected: &StepIdentity,
) -> Result<(), AssertionMismatch> {
    if trace.iter().any(|record| expected.matches(record)) {
        Ok(())
    } else {
        tracing::debug!("Step '{}' missing from trace", expected.name);
        Err(AssertionMismatch::missing(trace, expected))
    }
}

/// Succeeds iff no trace entry matches `expected`.
pub fn assert_absent(
    trace: &ExecutionTrace,
    expected: &StepIdentity,
) -> Result<(), AssertionMismatch> {
    if trace.iter().any(|record| expected.matches(record)) {
        tracing::debug!("Step '{}' unexpectedly present in trace", expected.name);
        Err(AssertionMismatch::unexpected(trace, expected))
    } else {
        Ok(())
    }
}

/// Assert every step present (`did_execute`) or every step absent.
///
/// Stops at the first failing step.
pub fn assert_steps(
    trace: &ExecutionTrace,
    steps: &[StepIdentity],
    did_execute: bool,
) -> Result<(), AssertionMismatch> {
    for expected in steps {
        if did_execute {
            assert_present(trace, expected)?;
        } else {
            assert_absent(trace, expected)?;
        }
    }
    Ok(())
}

/// Number of trace entries matching `expected`.
pub fn count_matches(trace: &ExecutionTrace, expected: &StepIdentity) -> usize {
    trace.iter().filter(|record| expected.matches(record)).count()
}
