//! Canonical identity of one workflow step execution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::params::StepParams;
use super::line::MockLine;
use super::trace::TraceStep;

/// Exit status of a successful step.
pub const STATUS_SUCCESS: i32 = 0;

/// Exit status used for a failed step when no specific code matters.
pub const STATUS_FAILURE: i32 = 1;

/// One step, identified by `(name, job_id)`.
///
/// Two identities are equal iff every field is structurally equal. Inputs
/// and envs compare as ordered lists.
///
/// # Example
///
/// ```
/// use workflow_fixtures::step::StepIdentity;
///
/// let step = StepIdentity::new("Update production branch", Some("updateProduction"), "Updating production branch")
///     .with_inputs([("TARGET_BRANCH", "production")]);
///
/// assert_eq!(step.job_id.as_deref(), Some("UPDATEPRODUCTION"));
/// assert_eq!(
///     step.output_line(),
///     "[MOCK] UPDATEPRODUCTION Updating production branch, TARGET_BRANCH=production"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepIdentity {
    /// Step name as declared in the workflow.
    pub name: String,

    /// Uppercased job id; `None` means job-agnostic.
    pub job_id: Option<String>,

    /// Log line the step is expected to produce.
    pub message: String,

    /// Declared `with:` parameters.
    pub inputs: StepParams,

    /// Declared `env:` entries.
    pub envs: StepParams,

    /// Exit status (0 = success).
    pub status: i32,

    /// Values the step resolves to for dependent steps.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,

    /// Whether the step executes at all.
    pub will_run: bool,
}

impl StepIdentity {
    /// Create a successful, running step with no parameters.
    ///
    /// The job id is uppercased into its canonical form.
    pub fn new(name: impl Into<String>, job_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_id: job_id.map(str::to_uppercase),
            message: message.into(),
            inputs: StepParams::new(),
            envs: StepParams::new(),
            status: STATUS_SUCCESS,
            outputs: BTreeMap::new(),
            will_run: true,
        }
    }

    /// Set the declared inputs, in order.
    pub fn with_inputs<I, K, V>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inputs = inputs.into_iter().collect();
        self
    }

    /// Set the declared env entries, in order.
    pub fn with_envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.envs = envs.into_iter().collect();
        self
    }

    /// Set the exit status.
    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    /// Expect the step to fail.
    pub fn failed(self) -> Self {
        self.with_status(STATUS_FAILURE)
    }

    /// Set the step outputs.
    pub fn with_outputs<I, K, V>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.outputs = outputs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Mark the step as not executing.
    pub fn skipped(mut self) -> Self {
        self.will_run = false;
        self
    }

    /// Whether the step is expected to succeed.
    pub fn succeeded(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Copy with inputs and envs sorted by key.
    pub fn normalized(&self) -> Self {
        Self {
            inputs: self.inputs.normalized(),
            envs: self.envs.normalized(),
            ..self.clone()
        }
    }

    /// The decoded line a mocked execution of this step prints.
    pub fn mock_line(&self) -> MockLine {
        MockLine {
            inputs: self.inputs.clone(),
            envs: self.envs.clone(),
            ..MockLine::new(self.job_id.as_deref(), &self.message)
        }
    }

    /// The line a mocked execution of this step prints.
    pub fn output_line(&self) -> String {
        self.mock_line().to_string()
    }

    /// The trace record this step produces, or `None` if it does not run.
    pub fn to_trace_step(&self) -> Option<TraceStep> {
        self.will_run
            .then(|| TraceStep::new(self.name.clone(), self.status, self.output_line()))
    }

    /// Whether a trace record is an execution of exactly this step.
    ///
    /// Compares name and status, then decodes the record output and
    /// compares headline, ordered inputs and ordered envs. A step that will
    /// not run matches nothing, and neither does output that is not a mock
    /// line.
    pub fn matches(&self, record: &TraceStep) -> bool {
        self.will_run
            && self.name == record.name
            && self.status == record.status
            && MockLine::parse(&record.output).is_some_and(|line| line == self.mock_line())
    }
}

impl fmt::Display for StepIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ name: {:?}, job: {}, message: {:?}, inputs: {}, envs: {}, status: {}, will_run: {} }}",
            self.name,
            self.job_id.as_deref().unwrap_or("<any>"),
            self.message,
            self.inputs,
            self.envs,
            self.status,
            self.will_run
        )
    }
}
