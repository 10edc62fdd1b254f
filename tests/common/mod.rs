//! Shared fixtures for integration tests.
//!
//! [`ReleaseCycleEngine`] is an in-process stand-in for a workflow engine.
//! It plays the `finishReleaseCycle` fixture workflow job by job, replacing
//! every step with its mock through [`MockStep::simulate`], the same record
//! a real engine derives from the mock's script output.
#![allow(dead_code)]

pub mod assertions;
pub mod mocks;

use std::path::{Path, PathBuf};

use serde_json::json;
use workflow_fixtures::mock::{MockStep, MockSteps};
use workflow_fixtures::runner::{RunOptions, WorkflowRunner};
use workflow_fixtures::secrets::SecretMasker;
use workflow_fixtures::step::{ExecutionTrace, StepParams};
use workflow_fixtures::workflow::load_workflow;
use workflow_fixtures::{FixtureError, Result};

use assertions::NOT_A_TEAM_MEMBER_COMMENT;

pub const ACTOR: &str = "Dummy Author";
pub const ISSUE_NUMBER: &str = "1234";

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn release_cycle_workflow() -> PathBuf {
    fixtures_dir().join("finishReleaseCycle.yml")
}

/// An `issues` payload for a closed issue with the given labels.
pub fn closed_issue(labels: &[&str]) -> serde_json::Value {
    let labels: Vec<_> = labels.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "action": "closed",
        "type": "closed",
        "issue": { "labels": labels, "number": ISSUE_NUMBER },
    })
}

/// Run options shared by the release cycle scenarios.
pub fn release_cycle_options(validate: Vec<MockStep>) -> RunOptions {
    RunOptions::new(release_cycle_workflow())
        .with_actor(ACTOR)
        .with_event_payload(closed_issue(&["StagingDeployCash"]))
        .with_secret("OS_BOTIFY_TOKEN", "dummy_token")
        .with_secret("LARGE_SECRET_PASSPHRASE", "3xtr3m3ly_53cr3t_p455w0rd")
        .with_secret("SLACK_WEBHOOK", "dummy_slack_webhook")
        .with_mock_steps(
            MockSteps::new()
                .with_job("validate", validate)
                .with_job(
                    "updateProduction",
                    mocks::FINISHRELEASECYCLE__UPDATEPRODUCTION__STEP_MOCKS(),
                )
                .with_job(
                    "createNewPatchVersion",
                    mocks::FINISHRELEASECYCLE__CREATENEWPATCHVERSION__STEP_MOCKS(),
                )
                .with_job(
                    "createNewStagingDeployCash",
                    mocks::FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__STEP_MOCKS(),
                ),
        )
}

/// Fake engine for the `finishReleaseCycle` fixture workflow.
#[derive(Debug, Default)]
pub struct ReleaseCycleEngine;

impl WorkflowRunner for ReleaseCycleEngine {
    fn run_event(&self, event: &str, options: &RunOptions) -> Result<ExecutionTrace> {
        let graph = load_workflow(&options.workflow_file)?;
        options.mock_steps.validate_against(&graph)?;

        let mut run = Run {
            options,
            masker: options.masker(),
            trace: ExecutionTrace::default(),
        };
        if event != "issues" {
            return Ok(run.trace);
        }

        let issue = &options.event_payload["issue"];
        let is_release_issue = issue["labels"]
            .as_array()
            .is_some_and(|labels| labels.iter().any(|l| l["name"] == "StagingDeployCash"));
        if !is_release_issue {
            return Ok(run.trace);
        }
        let issue_number = match &issue["number"] {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let token = run.secret("OS_BOTIFY_TOKEN");
        let passphrase = run.secret("LARGE_SECRET_PASSPHRASE");
        let (token, passphrase) = (token.as_str(), passphrase.as_str());
        let issue_number = issue_number.as_str();

        // validate
        let mut validate = Job::new("validate");
        let actor = options.actor.as_deref().unwrap_or_default();
        let deployer = run.step(
            &mut validate,
            "Validate actor is deployer",
            &[("GITHUB_TOKEN", token), ("username", actor), ("team", "mobile-deployers")],
        )?;
        let is_deployer = output_is_true(deployer.as_ref(), "IS_DEPLOYER");

        if !is_deployer && validate.ok() {
            run.step(
                &mut validate,
                "Reopen and comment on issue (not a team member)",
                &[
                    ("GITHUB_TOKEN", token),
                    ("ISSUE_NUMBER", issue_number),
                    ("COMMENT", NOT_A_TEAM_MEMBER_COMMENT),
                ],
            )?;
        }
        let mut has_blockers = false;
        if is_deployer && validate.ok() {
            let check = run.step(
                &mut validate,
                "Check for any deploy blockers",
                &[("GITHUB_TOKEN", token), ("ISSUE_NUMBER", issue_number)],
            )?;
            has_blockers = output_is_true(check.as_ref(), "HAS_DEPLOY_BLOCKERS");
        }
        if has_blockers && validate.ok() {
            run.step(
                &mut validate,
                "Reopen and comment on issue (has blockers)",
                &[("GITHUB_TOKEN", token), ("ISSUE_NUMBER", issue_number)],
            )?;
        }
        let is_valid = validate.ok() && is_deployer && !has_blockers;
        if !is_valid {
            return Ok(run.trace);
        }

        // updateProduction and createNewPatchVersion
        let mut update_production = Job::new("updateProduction");
        run.step(
            &mut update_production,
            "Update production branch",
            &[
                ("TARGET_BRANCH", "production"),
                ("OS_BOTIFY_TOKEN", token),
                ("GPG_PASSPHRASE", passphrase),
            ],
        )?;

        let mut new_patch_version = Job::new("createNewPatchVersion");
        let version = run.step(
            &mut new_patch_version,
            "Create new version",
            &[("SEMVER_LEVEL", "PATCH")],
        )?;
        let new_version = version
            .and_then(|m| m.outputs.get("NEW_VERSION").cloned())
            .unwrap_or_default();

        if !(update_production.ok() && new_patch_version.ok()) {
            return Ok(run.trace);
        }

        // createNewStagingDeployCash
        let mut staging = Job::new("createNewStagingDeployCash");
        run.step(
            &mut staging,
            "Update staging branch to trigger staging deploy",
            &[
                ("TARGET_BRANCH", "staging"),
                ("OS_BOTIFY_TOKEN", token),
                ("GPG_PASSPHRASE", passphrase),
            ],
        )?;
        if staging.ok() {
            run.step(&mut staging, "Tag version", &[])?;
        }
        if staging.ok() {
            run.step(
                &mut staging,
                "Create new StagingDeployCash",
                &[("GITHUB_TOKEN", token), ("NPM_VERSION", new_version.as_str())],
            )?;
        }
        if !staging.ok() {
            let webhook = run.secret("SLACK_WEBHOOK");
            run.step(
                &mut staging,
                "Announce failed workflow in Slack",
                &[("SLACK_WEBHOOK", webhook.as_str())],
            )?;
        }

        Ok(run.trace)
    }
}

struct Job {
    id: &'static str,
    failed: bool,
}

impl Job {
    fn new(id: &'static str) -> Self {
        Self { id, failed: false }
    }

    fn ok(&self) -> bool {
        !self.failed
    }
}

struct Run<'a> {
    options: &'a RunOptions,
    masker: SecretMasker,
    trace: ExecutionTrace,
}

impl Run<'_> {
    fn secret(&self, name: &str) -> String {
        self.options.secrets.get(name).cloned().unwrap_or_default()
    }

    /// Execute the mock for a step. Returns the mock if the step ran.
    fn step(
        &mut self,
        job: &mut Job,
        name: &str,
        with: &[(&str, &str)],
    ) -> Result<Option<MockStep>> {
        let mock = self
            .options
            .mock_steps
            .get(job.id)
            .and_then(|mocks| mocks.iter().find(|m| m.name == name))
            .cloned()
            .ok_or_else(|| FixtureError::Execution {
                message: format!("no mock for step '{}' in job '{}'", name, job.id),
            })?;

        let inputs: StepParams = with
            .iter()
            .map(|(key, value)| (*key, self.masker.mask(value)))
            .collect();
        let Some(record) = mock.simulate(&inputs, &StepParams::new()) else {
            return Ok(None);
        };
        if record.status != 0 {
            job.failed = true;
        }
        self.trace.push(record);
        Ok(Some(mock))
    }
}

fn output_is_true(mock: Option<&MockStep>, key: &str) -> bool {
    mock.and_then(|m| m.outputs.get(key))
        .is_some_and(|value| value == "true")
}
