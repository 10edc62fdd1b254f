//! [`WorkflowRunner`] backed by the `act` binary.

use serde_yaml::{Mapping, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::error::{FixtureError, Result};
use crate::mock::{input_env_name, MockStep, MockSteps};
use crate::secrets::SecretMasker;
use crate::step::ExecutionTrace;
use crate::workflow::load_workflow;

use super::act_output::parse_trace;
use super::{RunOptions, WorkflowRunner};

/// Default name of the `act` executable.
pub const DEFAULT_ACT_BINARY: &str = "act";

/// Runs workflows locally with `act`, mocked steps substituted in.
///
/// The workflow file is never modified: a mocked copy is written to a
/// scratch directory and passed with `-W`, while `act` runs inside the
/// repository so checkouts and local actions resolve.
#[derive(Debug, Clone)]
pub struct ActRunner {
    repo_path: PathBuf,
    binary: String,
}

impl ActRunner {
    /// Runner for the repository at `repo_path`.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            binary: DEFAULT_ACT_BINARY.to_string(),
        }
    }

    /// Use a different `act` executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn command(
        &self,
        event: &str,
        workflow_path: &Path,
        event_path: &Path,
        options: &RunOptions,
    ) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(event)
            .arg("-W")
            .arg(workflow_path)
            .arg("-e")
            .arg(event_path);
        if let Some(actor) = &options.actor {
            cmd.arg("--actor").arg(actor);
        }
        for (key, value) in &options.secrets {
            cmd.arg("-s").arg(format!("{}={}", key, value));
        }
        for (key, value) in &options.env {
            cmd.arg("--env").arg(format!("{}={}", key, value));
        }
        for (key, value) in &options.inputs {
            cmd.arg("--input").arg(format!("{}={}", key, value));
        }
        cmd.current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run `act` to completion or the deadline, collecting output lines.
    fn execute(&self, mut cmd: Command, options: &RunOptions) -> Result<String> {
        tracing::debug!("Running {:?}", cmd);
        let mut child = cmd.spawn().map_err(|e| FixtureError::Execution {
            message: format!("failed to start '{}': {}", self.binary, e),
        })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, tx.clone()));
        }
        drop(tx);

        let deadline = Instant::now() + options.timeout;
        let mut lines = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(line) => lines.push(line),
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    kill(&mut child);
                    return Err(FixtureError::ExecutionTimeout {
                        timeout: options.timeout,
                    });
                }
            }
        }

        for reader in readers {
            let _ = reader.join();
        }
        let status = child.wait()?;
        if !status.success() {
            tracing::debug!("act exited with {}", status);
        }
        Ok(lines.join("\n"))
    }
}

impl WorkflowRunner for ActRunner {
    fn run_event(&self, event: &str, options: &RunOptions) -> Result<ExecutionTrace> {
        let graph = load_workflow(&options.workflow_file)?;
        options.mock_steps.validate_against(&graph)?;

        let yaml = fs::read_to_string(&options.workflow_file)?;
        let mocked = substitute_mocks(&yaml, &options.mock_steps)?;

        let scratch = tempfile::Builder::new().prefix("wfx-act").tempdir()?;
        let file_name = options
            .workflow_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("workflow.yml"));
        let workflow_path = scratch.path().join(file_name);
        fs::write(&workflow_path, mocked)?;
        let event_path = scratch.path().join("event.json");
        fs::write(&event_path, options.event_json())?;

        let cmd = self.command(event, &workflow_path, &event_path, options);
        let output = self.execute(cmd, options)?;

        let masker = options.masker();
        if let Some(log_file) = &options.log_file {
            write_log(log_file, &output, &masker)?;
        }
        let trace = parse_trace(&masker.mask(&output));
        tracing::debug!("'{}' produced {} trace steps", event, trace.len());
        Ok(trace)
    }
}

/// Replace mocked steps in workflow YAML with their mock scripts.
///
/// Each mocked step keeps its `name`, `id`, `if` and `continue-on-error`;
/// its `with:` values move into `INPUT_*` environment variables next to its
/// own `env:`. A mock that will not run gets `if: false`.
///
/// # Errors
///
/// `WorkflowParse` for malformed YAML, `Configuration` if a job or step to
/// mock cannot be found.
pub fn substitute_mocks(yaml: &str, mock_steps: &MockSteps) -> Result<String> {
    let mut doc: Value = serde_yaml::from_str(yaml).map_err(|e| FixtureError::WorkflowParse {
        origin: "<mocked workflow>".to_string(),
        message: e.to_string(),
    })?;

    for (job_id, mocks) in mock_steps.iter() {
        let steps = doc
            .get_mut("jobs")
            .and_then(|jobs| jobs.get_mut(job_id))
            .and_then(|job| job.get_mut("steps"))
            .and_then(Value::as_sequence_mut)
            .ok_or_else(|| FixtureError::Configuration {
                message: format!("workflow has no steps for job '{}'", job_id),
            })?;

        let mut replaced = vec![false; steps.len()];
        for mock in mocks {
            let index = steps
                .iter()
                .enumerate()
                .position(|(i, step)| !replaced[i] && step_matches(step, mock))
                .ok_or_else(|| FixtureError::Configuration {
                    message: format!("job '{}' has no step '{}'", job_id, mock.name),
                })?;
            steps[index] = mocked_step(&steps[index], mock);
            replaced[index] = true;
        }
    }

    serde_yaml::to_string(&doc).map_err(|e| FixtureError::Other(e.into()))
}

fn step_matches(step: &Value, mock: &MockStep) -> bool {
    match &mock.id {
        Some(id) => step.get("id").and_then(Value::as_str) == Some(id.as_str()),
        None => step.get("name").and_then(Value::as_str).unwrap_or_default() == mock.name,
    }
}

fn mocked_step(original: &Value, mock: &MockStep) -> Value {
    let mut env = original
        .get("env")
        .and_then(Value::as_mapping)
        .cloned()
        .unwrap_or_default();
    if let Some(with) = original.get("with").and_then(Value::as_mapping) {
        for (key, value) in with {
            if let Some(key) = key.as_str() {
                env.insert(Value::from(input_env_name(key)), value.clone());
            }
        }
    }

    let mut step = Mapping::new();
    for field in ["name", "id", "continue-on-error"] {
        if let Some(value) = original.get(field) {
            step.insert(Value::from(field), value.clone());
        }
    }
    if !mock.will_run {
        step.insert(Value::from("if"), Value::Bool(false));
    } else if let Some(condition) = original.get("if") {
        step.insert(Value::from("if"), condition.clone());
    }
    if !env.is_empty() {
        step.insert(Value::from("env"), Value::Mapping(env));
    }
    step.insert(Value::from("run"), Value::from(mock.script()));
    step.insert(Value::from("shell"), Value::from("bash"));
    Value::Mapping(step)
}

fn spawn_reader<R: Read + Send + 'static>(source: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(source);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    })
}

fn kill(child: &mut Child) {
    if let Err(err) = child.kill() {
        tracing::warn!("Could not kill act: {}", err);
    }
    let _ = child.wait();
}

fn write_log(path: &Path, output: &str, masker: &SecretMasker) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = masker.writer(file);
    writer.write_all(output.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Wrote act log to {}", path.display());
    Ok(())
}
