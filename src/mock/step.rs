//! Mock step descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::step::line::{mock_headline, param_prefix};
use crate::step::{StepIdentity, StepParams, TraceStep, STATUS_FAILURE, STATUS_SUCCESS};

/// A canned replacement for one workflow step.
///
/// Declares which parameters the mocked step receives (keys only) and the
/// result it reports (status, outputs). Values are checked by assertions,
/// not here.
///
/// # Example
///
/// ```
/// use workflow_fixtures::mock::MockStep;
///
/// let mock = MockStep::new("Checkout", "Checkout", Some("validate"), &["fetch-depth"], &[])
///     .with_outputs([("SHA", "abc123")]);
///
/// assert_eq!(mock.job_id.as_deref(), Some("VALIDATE"));
/// assert!(mock.script().contains(">> \"$GITHUB_OUTPUT\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockStep {
    /// Name of the step being replaced.
    pub name: String,

    /// Message the mock prints.
    pub message: String,

    /// Uppercased job id, or `None` for job-agnostic mocks.
    pub job_id: Option<String>,

    /// `with:` keys the step receives.
    pub input_keys: Vec<String>,

    /// `env:` keys the step receives.
    pub env_keys: Vec<String>,

    /// Step outputs written to `$GITHUB_OUTPUT`.
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,

    /// Variables exported to `$GITHUB_ENV`.
    #[serde(default)]
    pub out_envs: BTreeMap<String, String>,

    /// Exit status reported by the mock.
    pub status: i32,

    /// Whether the step runs at all.
    pub will_run: bool,

    /// Step `id:` to match instead of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MockStep {
    /// Create a successful, running mock with no outputs.
    pub fn new(
        name: &str,
        message: &str,
        job_id: Option<&str>,
        input_keys: &[&str],
        env_keys: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            job_id: job_id.map(str::to_uppercase),
            input_keys: input_keys.iter().map(|k| k.to_string()).collect(),
            env_keys: env_keys.iter().map(|k| k.to_string()).collect(),
            outputs: BTreeMap::new(),
            out_envs: BTreeMap::new(),
            status: STATUS_SUCCESS,
            will_run: true,
            id: None,
        }
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

    /// Set variables exported to later steps of the job.
    pub fn with_out_envs<I, K, V>(mut self, out_envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.out_envs = out_envs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Set the reported exit status.
    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    /// Make the mock fail.
    pub fn failing(self) -> Self {
        self.with_status(STATUS_FAILURE)
    }

    /// Keep the step out of the run entirely.
    pub fn skipped(mut self) -> Self {
        self.will_run = false;
        self
    }

    /// Match the workflow step by `id:` instead of name.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether the mock reports success.
    pub fn succeeds(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Shell script that replaces the real step.
    ///
    /// Prints the mock line with every declared parameter, writes outputs
    /// and exported envs, then exits with the configured status. Parameter
    /// values are read from the environment at run time and escaped the way
    /// [`MockLine`](crate::step::MockLine) expects.
    pub fn script(&self) -> String {
        let mut echo = format!(
            "echo {}",
            shell_words::quote(&mock_headline(self.job_id.as_deref(), &self.message))
        );
        let params = self
            .input_keys
            .iter()
            .map(|key| (", ", key, input_env_name(key)))
            .chain(
                self.env_keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| (if i == 0 { "; " } else { ", " }, key, key.clone())),
            );
        for (separator, key, variable) in params {
            echo.push_str(&shell_words::quote(&format!("{}{}", separator, param_prefix(key))));
            echo.push_str(&format!(
                "\"$({} \"$(printenv {} || true)\")\"",
                ESCAPE_FN_NAME,
                shell_words::quote(&variable)
            ));
        }

        let mut lines = vec![ESCAPE_FN.to_string(), echo];
        for (key, value) in &self.outputs {
            lines.push(format!(
                "echo {} >> \"$GITHUB_OUTPUT\"",
                shell_words::quote(&format!("{}={}", key, value))
            ));
        }
        for (key, value) in &self.out_envs {
            lines.push(format!(
                "echo {} >> \"$GITHUB_ENV\"",
                shell_words::quote(&format!("{}={}", key, value))
            ));
        }
        if self.status != STATUS_SUCCESS {
            lines.push(format!("exit {}", self.status));
        }
        lines.join("\n")
    }

    /// The identity this mock reports when run with the given values.
    ///
    /// Keys keep the mock's declared order; keys without a value resolve to
    /// an empty string, as an unset expression does.
    pub fn identity(&self, inputs: &StepParams, envs: &StepParams) -> StepIdentity {
        let resolve = |keys: &[String], values: &StepParams| -> Vec<(String, String)> {
            keys.iter()
                .map(|k| (k.clone(), values.get(k).unwrap_or_default().to_string()))
                .collect()
        };

        let mut identity = StepIdentity::new(&self.name, self.job_id.as_deref(), &self.message)
            .with_inputs(resolve(&self.input_keys, inputs))
            .with_envs(resolve(&self.env_keys, envs))
            .with_status(self.status)
            .with_outputs(self.outputs.clone());
        identity.will_run = self.will_run;
        identity
    }

    /// The trace record an engine reports for this mock, or `None` when the
    /// step does not run.
    pub fn simulate(&self, inputs: &StepParams, envs: &StepParams) -> Option<TraceStep> {
        self.identity(inputs, envs).to_trace_step()
    }
}

const ESCAPE_FN_NAME: &str = "wfx_escape";

/// Backslash-escapes `\`, `,` and `;` in its argument.
const ESCAPE_FN: &str = r#"wfx_escape() { printf '%s' "$1" | sed -e 's/[\\,;]/\\&/g'; }"#;

/// Environment variable a mocked step reads a `with:` input from.
pub fn input_env_name(key: &str) -> String {
    format!("INPUT_{}", key.replace(' ', "_").to_uppercase())
}
