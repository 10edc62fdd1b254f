//! Options for one workflow run.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::mock::MockSteps;
use crate::secrets::{looks_secret, SecretMasker};

use super::DEFAULT_TIMEOUT;

/// Everything a [`WorkflowRunner`](super::WorkflowRunner) needs besides the
/// event name.
///
/// # Example
///
/// ```
/// use workflow_fixtures::mock::{MockStep, MockSteps};
/// use workflow_fixtures::runner::RunOptions;
///
/// let options = RunOptions::new(".github/workflows/deploy.yml")
///     .with_actor("Dummy Author")
///     .with_secret("OS_BOTIFY_TOKEN", "dummy_token")
///     .with_mock_steps(MockSteps::new().with_job(
///         "validate",
///         vec![MockStep::new("Checkout", "Checkout", Some("validate"), &[], &[])],
///     ));
///
/// assert_eq!(options.masker().mask("dummy_token"), "***");
/// ```
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Workflow file to run.
    pub workflow_file: PathBuf,

    /// Mocks substituted for real steps, per job.
    pub mock_steps: MockSteps,

    /// Actor reported for the triggering event.
    pub actor: Option<String>,

    /// Where to tee the engine's output.
    pub log_file: Option<PathBuf>,

    /// Event payload; `Null` means an empty object.
    pub event_payload: serde_json::Value,

    /// Secrets, masked as `***` in every output.
    pub secrets: BTreeMap<String, String>,

    /// Environment variables for the run.
    pub env: BTreeMap<String, String>,

    /// `workflow_dispatch` inputs.
    pub inputs: BTreeMap<String, String>,

    /// Upper bound on the run.
    pub timeout: Duration,
}

impl RunOptions {
    pub fn new(workflow_file: impl Into<PathBuf>) -> Self {
        Self {
            workflow_file: workflow_file.into(),
            mock_steps: MockSteps::new(),
            actor: None,
            log_file: None,
            event_payload: serde_json::Value::Null,
            secrets: BTreeMap::new(),
            env: BTreeMap::new(),
            inputs: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_mock_steps(mut self, mock_steps: MockSteps) -> Self {
        self.mock_steps = mock_steps;
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_event_payload(mut self, payload: serde_json::Value) -> Self {
        self.event_payload = payload;
        self
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Event payload as JSON text, `{}` when unset.
    pub fn event_json(&self) -> String {
        match &self.event_payload {
            serde_json::Value::Null => "{}".to_string(),
            payload => payload.to_string(),
        }
    }

    /// Masker for this run: every secret value, plus env values whose names
    /// look like credentials.
    pub fn masker(&self) -> SecretMasker {
        let mut masker = SecretMasker::new();
        masker.add_secrets(self.secrets.values().cloned());
        masker.add_secrets(
            self.env
                .iter()
                .filter(|(name, _)| looks_secret(name))
                .map(|(_, value)| value.clone()),
        );
        masker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_has_defaults() {
        let options = RunOptions::new("wf.yml");
        assert_eq!(options.workflow_file, PathBuf::from("wf.yml"));
        assert!(options.mock_steps.is_empty());
        assert_eq!(options.actor, None);
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert_eq!(options.event_json(), "{}");
    }

    #[test]
    fn event_payload_serializes() {
        let options = RunOptions::new("wf.yml")
            .with_event_payload(json!({"issue": {"number": 1234}}));
        assert_eq!(options.event_json(), r#"{"issue":{"number":1234}}"#);
    }

    #[test]
    fn masker_covers_secrets_and_secret_looking_env() {
        let options = RunOptions::new("wf.yml")
            .with_secret("OS_BOTIFY_TOKEN", "dummy_token")
            .with_env("GITHUB_TOKEN", "gh_value")
            .with_env("ISSUE_NUMBER", "1234");
        let masker = options.masker();
        assert_eq!(masker.mask("dummy_token gh_value 1234"), "*** *** 1234");
    }

    #[test]
    fn builders_accumulate() {
        let options = RunOptions::new("wf.yml")
            .with_input("version", "1.2.3")
            .with_env("A", "1")
            .with_env("B", "2")
            .with_timeout(Duration::from_secs(5))
            .with_log_file("logs/run.log");
        assert_eq!(options.inputs.get("version").map(String::as_str), Some("1.2.3"));
        assert_eq!(options.env.len(), 2);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.log_file, Some(PathBuf::from("logs/run.log")));
    }
}
