//! Per-job mock step sets handed to a workflow engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{FixtureError, Result};
use crate::workflow::WorkflowGraph;

use super::step::MockStep;

/// Mock steps keyed by job id as declared in the workflow.
///
/// # Example
///
/// ```
/// use workflow_fixtures::mock::{MockStep, MockSteps};
///
/// let mocks = MockSteps::new()
///     .with_job("validate", vec![MockStep::new("Checkout", "Checkout", Some("validate"), &[], &[])]);
///
/// assert_eq!(mocks.get("validate").map(|m| m.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockSteps {
    jobs: BTreeMap<String, Vec<MockStep>>,
}

impl MockSteps {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mocks for a job, replacing any previous ones.
    pub fn with_job(mut self, job_id: impl Into<String>, steps: Vec<MockStep>) -> Self {
        self.insert(job_id, steps);
        self
    }

    /// Set the mocks for a job.
    pub fn insert(&mut self, job_id: impl Into<String>, steps: Vec<MockStep>) {
        self.jobs.insert(job_id.into(), steps);
    }

    /// Mocks for a job.
    pub fn get(&self, job_id: &str) -> Option<&[MockStep]> {
        self.jobs.get(job_id).map(Vec::as_slice)
    }

    /// Replace the mock with the same step name in a job.
    ///
    /// Returns `false` if the job has no mock with that name.
    pub fn replace(&mut self, job_id: &str, mock: MockStep) -> bool {
        let Some(steps) = self.jobs.get_mut(job_id) else {
            return false;
        };
        match steps.iter_mut().find(|m| m.name == mock.name) {
            Some(slot) => {
                *slot = mock;
                true
            }
            None => false,
        }
    }

    /// Iterate `(job_id, mocks)` in job id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MockStep])> {
        self.jobs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of jobs with mocks.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job has mocks.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Check every mock against the workflow it will run in.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if a job id is unknown, a mock's job id does
    /// not belong to the job it is listed under, or no step in the job has
    /// the mock's name (or `id:`).
    pub fn validate_against(&self, graph: &WorkflowGraph) -> Result<()> {
        for (job_id, mocks) in &self.jobs {
            let job = graph.job(job_id).ok_or_else(|| FixtureError::Configuration {
                message: format!(
                    "mock steps given for job '{}' which the workflow does not define",
                    job_id
                ),
            })?;

            for mock in mocks {
                if let Some(mock_job) = &mock.job_id {
                    if *mock_job != job_id.to_uppercase() {
                        return Err(FixtureError::Configuration {
                            message: format!(
                                "mock '{}' is tagged with job '{}' but listed under '{}'",
                                mock.name, mock_job, job_id
                            ),
                        });
                    }
                }
                if job.find_step(&mock.name, mock.id.as_deref()).is_none() {
                    return Err(FixtureError::Configuration {
                        message: format!("job '{}' has no step '{}'", job_id, mock.name),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::parse;

    fn graph() -> WorkflowGraph {
        parse(
            r#"
jobs:
  validate:
    steps:
      - name: Checkout
      - name: Validate
        id: validateActor
"#,
        )
        .unwrap()
    }

    fn checkout() -> MockStep {
        MockStep::new("Checkout", "Checkout", Some("validate"), &[], &[])
    }

    #[test]
    fn valid_mocks_pass() {
        let mocks = MockSteps::new().with_job(
            "validate",
            vec![
                checkout(),
                MockStep::new("renamed", "Validating", None, &[], &[]).with_id("validateActor"),
            ],
        );
        assert!(mocks.validate_against(&graph()).is_ok());
    }

    #[test]
    fn unknown_job_is_configuration_error() {
        let mocks = MockSteps::new().with_job("deploy", vec![checkout()]);
        let err = mocks.validate_against(&graph()).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("'deploy'"));
    }

    #[test]
    fn mismatched_job_tag_is_configuration_error() {
        let mocks = MockSteps::new().with_job(
            "validate",
            vec![MockStep::new("Checkout", "Checkout", Some("build"), &[], &[])],
        );
        let err = mocks.validate_against(&graph()).unwrap_err();
        assert!(err.to_string().contains("tagged with job 'BUILD'"));
    }

    #[test]
    fn unknown_step_is_configuration_error() {
        let mocks = MockSteps::new().with_job(
            "validate",
            vec![MockStep::new("Deploy", "Deploy", Some("validate"), &[], &[])],
        );
        let err = mocks.validate_against(&graph()).unwrap_err();
        assert!(err.to_string().contains("no step 'Deploy'"));
    }

    #[test]
    fn replace_swaps_mock_by_name() {
        let mut mocks = MockSteps::new().with_job("validate", vec![checkout()]);
        assert!(mocks.replace("validate", checkout().failing()));
        assert_eq!(mocks.get("validate").unwrap()[0].status, 1);
        assert!(!mocks.replace("validate", MockStep::new("Other", "x", None, &[], &[])));
        assert!(!mocks.replace("deploy", checkout()));
    }

    #[test]
    fn iterates_in_job_order() {
        let mocks = MockSteps::new()
            .with_job("b", vec![])
            .with_job("a", vec![checkout()]);
        let ids: Vec<&str> = mocks.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(mocks.len(), 2);
    }
}
