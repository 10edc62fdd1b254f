//! Step assertions for the `finishReleaseCycle` workflow.

use workflow_fixtures::assertion::{assert_steps, AssertionMismatch};
use workflow_fixtures::step::{ExecutionTrace, StepIdentity};

pub const NOT_A_TEAM_MEMBER_COMMENT: &str =
    "Sorry, only members of @Expensify/Mobile-Deployers can close deploy checklists.\nReopening!";

/// How the validate job is expected to have gone.
#[derive(Debug, Clone, Copy)]
pub struct Validation {
    pub did_execute: bool,
    pub is_team_member: bool,
    pub has_blockers: bool,
}

impl Validation {
    pub fn passed() -> Self {
        Self {
            did_execute: true,
            is_team_member: true,
            has_blockers: false,
        }
    }

    pub fn not_team_member() -> Self {
        Self {
            is_team_member: false,
            ..Self::passed()
        }
    }

    pub fn blocked() -> Self {
        Self {
            has_blockers: true,
            ..Self::passed()
        }
    }

    pub fn skipped() -> Self {
        Self {
            did_execute: false,
            ..Self::passed()
        }
    }
}

pub fn assert_validate_job_executed(
    trace: &ExecutionTrace,
    username: &str,
    issue_number: &str,
    expected: Validation,
) -> Result<(), AssertionMismatch> {
    let mut steps: Vec<StepIdentity> = vec![StepIdentity::new(
        "Validate actor is deployer",
        Some("VALIDATE"),
        "Validating if actor is deployer",
    )
    .with_inputs([
        ("GITHUB_TOKEN", "***"),
        ("username", username),
        ("team", "mobile-deployers"),
    ])];
    if expected.is_team_member {
        steps.push(
            StepIdentity::new(
                "Check for any deploy blockers",
                Some("VALIDATE"),
                "Checking for deploy blockers",
            )
            .with_inputs([("GITHUB_TOKEN", "***"), ("ISSUE_NUMBER", issue_number)]),
        );
    }
    assert_steps(trace, &steps, expected.did_execute)?;

    let not_team_member_steps = [StepIdentity::new(
        "Reopen and comment on issue (not a team member)",
        Some("VALIDATE"),
        "Reopening issue - not a team member",
    )
    .with_inputs([
        ("GITHUB_TOKEN", "***"),
        ("ISSUE_NUMBER", issue_number),
        ("COMMENT", NOT_A_TEAM_MEMBER_COMMENT),
    ])];
    assert_steps(
        trace,
        &not_team_member_steps,
        expected.did_execute && !expected.is_team_member,
    )?;

    let blocker_steps = [StepIdentity::new(
        "Reopen and comment on issue (has blockers)",
        Some("VALIDATE"),
        "Reopening issue - blockers",
    )
    .with_inputs([("GITHUB_TOKEN", "***"), ("ISSUE_NUMBER", issue_number)])];
    assert_steps(trace, &blocker_steps, expected.did_execute && expected.has_blockers)
}

pub fn assert_update_production_job_executed(
    trace: &ExecutionTrace,
    did_execute: bool,
) -> Result<(), AssertionMismatch> {
    let steps = [StepIdentity::new(
        "Update production branch",
        Some("UPDATEPRODUCTION"),
        "Updating production branch",
    )
    .with_inputs([
        ("TARGET_BRANCH", "production"),
        ("OS_BOTIFY_TOKEN", "***"),
        ("GPG_PASSPHRASE", "***"),
    ])];
    assert_steps(trace, &steps, did_execute)
}

pub fn assert_create_new_patch_version_job_executed(
    trace: &ExecutionTrace,
    did_execute: bool,
) -> Result<(), AssertionMismatch> {
    let steps = [StepIdentity::new(
        "Create new version",
        Some("CREATENEWPATCHVERSION"),
        "Creating new version",
    )
    .with_inputs([("SEMVER_LEVEL", "PATCH")])];
    assert_steps(trace, &steps, did_execute)
}

pub fn assert_create_new_staging_deploy_cash_job_executed(
    trace: &ExecutionTrace,
    new_version: &str,
    did_execute: bool,
    is_successful: bool,
) -> Result<(), AssertionMismatch> {
    let mut create = StepIdentity::new(
        "Create new StagingDeployCash",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        "Creating new StagingDeployCash",
    )
    .with_inputs([("GITHUB_TOKEN", "***"), ("NPM_VERSION", new_version)]);
    if !is_successful {
        create = create.failed();
    }

    let steps = [
        StepIdentity::new(
            "Update staging branch to trigger staging deploy",
            Some("CREATENEWSTAGINGDEPLOYCASH"),
            "Updating staging branch",
        )
        .with_inputs([
            ("TARGET_BRANCH", "staging"),
            ("OS_BOTIFY_TOKEN", "***"),
            ("GPG_PASSPHRASE", "***"),
        ]),
        StepIdentity::new(
            "Tag version",
            Some("CREATENEWSTAGINGDEPLOYCASH"),
            "Tagging version",
        ),
        create,
    ];
    assert_steps(trace, &steps, did_execute)?;

    let fail_steps = [StepIdentity::new(
        "Announce failed workflow in Slack",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        "Announcing failed workflow",
    )
    .with_inputs([("SLACK_WEBHOOK", "***")])];
    assert_steps(trace, &fail_steps, did_execute && !is_successful)
}
