//! Integration tests for the `wfx` binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORKFLOW: &str = r#"
name: Deploy
on: push
jobs:
  validate:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
        with:
          token: ${{ secrets.TOKEN }}
  deploy:
    needs: validate
    runs-on: ubuntu-latest
    steps:
      - name: Publish
        run: npm publish
        env:
          NPM_TOKEN: ${{ secrets.NPM_TOKEN }}
"#;

fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let workflows = temp.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("deploy.yml"), WORKFLOW).unwrap();
    temp
}

fn wfx(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("wfx"));
    cmd.arg("--project").arg(project).arg("--no-color");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("wfx"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate mocks, assertions"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("wfx"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_generates_three_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path())
        .arg("deploy.yml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mocks file written to"))
        .stdout(predicate::str::contains("Test file written to"));

    let tests = temp.path().join("workflow_tests");
    let mocks = fs::read_to_string(tests.join("mocks/deployMocks.rs"))?;
    assert!(mocks.contains("DEPLOY__VALIDATE__CHECKOUT__STEP_MOCK"));
    assert!(mocks.contains("pub fn DEPLOY__DEPLOY__STEP_MOCKS()"));
    assert!(tests.join("assertions/deployAssertions.rs").is_file());
    assert!(tests.join("deploy.test.rs").is_file());
    Ok(())
}

#[test]
fn cli_generates_javascript() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path())
        .args(["--lang", "js", "deploy.yml"])
        .assert()
        .success();

    let mocks = fs::read_to_string(temp.path().join("workflow_tests/mocks/deployMocks.js"))?;
    assert!(mocks.contains("const DEPLOY__VALIDATE__CHECKOUT__STEP_MOCK = utils.createMockStep("));
    Ok(())
}

#[test]
fn cli_requires_workflow_argument() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Please provide workflow file name"));
    Ok(())
}

#[test]
fn cli_rejects_invalid_file_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path())
        .arg("deploy.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[workflow].yml"));
    Ok(())
}

#[test]
fn cli_reports_missing_workflow() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path())
        .arg("release.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    assert!(!temp.path().join("workflow_tests").exists());
    Ok(())
}

#[test]
fn cli_never_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    wfx(temp.path()).arg("deploy.yml").assert().success();

    let mocks = temp.path().join("workflow_tests/mocks/deployMocks.rs");
    fs::write(&mocks, "// filled in by hand")?;

    wfx(temp.path())
        .arg("deploy.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&mocks)?, "// filled in by hand");
    Ok(())
}

#[test]
fn cli_reports_malformed_workflow() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::write(
        temp.path().join(".github/workflows/broken.yml"),
        "jobs:\n  build: [1, 2]\n",
    )?;

    wfx(temp.path())
        .arg("broken.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse workflow"));
    assert!(!temp.path().join("workflow_tests").exists());
    Ok(())
}

#[test]
fn cli_reads_project_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir_all(temp.path().join(".wfx"))?;
    fs::write(
        temp.path().join(".wfx/config.yml"),
        "language: javascript\ntests_dir: ci\nmocks_dir: ci/mocks\nassertions_dir: ci/assertions\n",
    )?;

    wfx(temp.path()).arg("deploy.yml").assert().success();
    assert!(temp.path().join("ci/mocks/deployMocks.js").is_file());
    assert!(temp.path().join("ci/deploy.test.js").is_file());
    Ok(())
}

#[test]
fn cli_rejects_bad_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir_all(temp.path().join(".wfx"))?;
    fs::write(temp.path().join(".wfx/config.yml"), "timeout_secs: soon\n")?;

    wfx(temp.path())
        .arg("deploy.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}
