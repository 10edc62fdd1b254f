//! Step mocks for the `finishReleaseCycle` workflow.
#![allow(non_snake_case)]

use workflow_fixtures::mock::MockStep;

// validate
fn FINISHRELEASECYCLE__VALIDATE__VALIDATE_ACTOR_IS_DEPLOYER__TRUE__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Validate actor is deployer",
        "Validating if actor is deployer",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "username", "team"],
        &[],
    )
    .with_outputs([("IS_DEPLOYER", "true")])
}

fn FINISHRELEASECYCLE__VALIDATE__VALIDATE_ACTOR_IS_DEPLOYER__FALSE__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Validate actor is deployer",
        "Validating if actor is deployer",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "username", "team"],
        &[],
    )
    .with_outputs([("IS_DEPLOYER", "false")])
}

fn FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_NOT_A_TEAM_MEMBER__STEP_MOCK(
) -> MockStep {
    MockStep::new(
        "Reopen and comment on issue (not a team member)",
        "Reopening issue - not a team member",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "ISSUE_NUMBER", "COMMENT"],
        &[],
    )
}

fn FINISHRELEASECYCLE__VALIDATE__CHECK_FOR_ANY_DEPLOY_BLOCKERS__FALSE__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Check for any deploy blockers",
        "Checking for deploy blockers",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "ISSUE_NUMBER"],
        &[],
    )
    .with_outputs([("HAS_DEPLOY_BLOCKERS", "false")])
}

fn FINISHRELEASECYCLE__VALIDATE__CHECK_FOR_ANY_DEPLOY_BLOCKERS__TRUE__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Check for any deploy blockers",
        "Checking for deploy blockers",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "ISSUE_NUMBER"],
        &[],
    )
    .with_outputs([("HAS_DEPLOY_BLOCKERS", "true")])
}

fn FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_HAS_BLOCKERS__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Reopen and comment on issue (has blockers)",
        "Reopening issue - blockers",
        Some("VALIDATE"),
        &["GITHUB_TOKEN", "ISSUE_NUMBER"],
        &[],
    )
}

pub fn FINISHRELEASECYCLE__VALIDATE__TEAM_MEMBER_NO_BLOCKERS__STEP_MOCKS() -> Vec<MockStep> {
    vec![
        FINISHRELEASECYCLE__VALIDATE__VALIDATE_ACTOR_IS_DEPLOYER__TRUE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_NOT_A_TEAM_MEMBER__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__CHECK_FOR_ANY_DEPLOY_BLOCKERS__FALSE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_HAS_BLOCKERS__STEP_MOCK(),
    ]
}

pub fn FINISHRELEASECYCLE__VALIDATE__TEAM_MEMBER_BLOCKERS__STEP_MOCKS() -> Vec<MockStep> {
    vec![
        FINISHRELEASECYCLE__VALIDATE__VALIDATE_ACTOR_IS_DEPLOYER__TRUE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_NOT_A_TEAM_MEMBER__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__CHECK_FOR_ANY_DEPLOY_BLOCKERS__TRUE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_HAS_BLOCKERS__STEP_MOCK(),
    ]
}

pub fn FINISHRELEASECYCLE__VALIDATE__NOT_TEAM_MEMBER_NO_BLOCKERS__STEP_MOCKS() -> Vec<MockStep> {
    vec![
        FINISHRELEASECYCLE__VALIDATE__VALIDATE_ACTOR_IS_DEPLOYER__FALSE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_NOT_A_TEAM_MEMBER__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__CHECK_FOR_ANY_DEPLOY_BLOCKERS__FALSE__STEP_MOCK(),
        FINISHRELEASECYCLE__VALIDATE__REOPEN_AND_COMMENT_ON_ISSUE_HAS_BLOCKERS__STEP_MOCK(),
    ]
}

// updateProduction (needs: validate)
fn FINISHRELEASECYCLE__UPDATEPRODUCTION__UPDATE_PRODUCTION_BRANCH__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Update production branch",
        "Updating production branch",
        Some("UPDATEPRODUCTION"),
        &["TARGET_BRANCH", "OS_BOTIFY_TOKEN", "GPG_PASSPHRASE"],
        &[],
    )
}

pub fn FINISHRELEASECYCLE__UPDATEPRODUCTION__STEP_MOCKS() -> Vec<MockStep> {
    vec![FINISHRELEASECYCLE__UPDATEPRODUCTION__UPDATE_PRODUCTION_BRANCH__STEP_MOCK()]
}

// createNewPatchVersion (needs: validate)
fn FINISHRELEASECYCLE__CREATENEWPATCHVERSION__CREATE_NEW_VERSION__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Create new version",
        "Creating new version",
        Some("CREATENEWPATCHVERSION"),
        &["SEMVER_LEVEL"],
        &[],
    )
    .with_outputs([("NEW_VERSION", "1.2.3")])
}

pub fn FINISHRELEASECYCLE__CREATENEWPATCHVERSION__STEP_MOCKS() -> Vec<MockStep> {
    vec![FINISHRELEASECYCLE__CREATENEWPATCHVERSION__CREATE_NEW_VERSION__STEP_MOCK()]
}

// createNewStagingDeployCash (needs: updateProduction, createNewPatchVersion)
fn FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__UPDATE_STAGING_BRANCH_TO_TRIGGER_STAGING_DEPLOY__STEP_MOCK(
) -> MockStep {
    MockStep::new(
        "Update staging branch to trigger staging deploy",
        "Updating staging branch",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        &["TARGET_BRANCH", "OS_BOTIFY_TOKEN", "GPG_PASSPHRASE"],
        &[],
    )
}

fn FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__TAG_VERSION__STEP_MOCK() -> MockStep {
    MockStep::new(
        "Tag version",
        "Tagging version",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        &[],
        &[],
    )
}

pub fn FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__CREATE_NEW_STAGINGDEPLOYCASH__STEP_MOCK(
) -> MockStep {
    MockStep::new(
        "Create new StagingDeployCash",
        "Creating new StagingDeployCash",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        &["GITHUB_TOKEN", "NPM_VERSION"],
        &[],
    )
}

fn FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__ANNOUNCE_FAILED_WORKFLOW_IN_SLACK__STEP_MOCK(
) -> MockStep {
    MockStep::new(
        "Announce failed workflow in Slack",
        "Announcing failed workflow",
        Some("CREATENEWSTAGINGDEPLOYCASH"),
        &["SLACK_WEBHOOK"],
        &[],
    )
}

pub fn FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__STEP_MOCKS() -> Vec<MockStep> {
    vec![
        FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__UPDATE_STAGING_BRANCH_TO_TRIGGER_STAGING_DEPLOY__STEP_MOCK(),
        FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__TAG_VERSION__STEP_MOCK(),
        FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__CREATE_NEW_STAGINGDEPLOYCASH__STEP_MOCK(),
        FINISHRELEASECYCLE__CREATENEWSTAGINGDEPLOYCASH__ANNOUNCE_FAILED_WORKFLOW_IN_SLACK__STEP_MOCK(),
    ]
}
