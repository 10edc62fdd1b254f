//! Rust output, targeting this crate's own API.

use crate::scaffold::ir::{
    ExpectedStepDecl, Item, JobAssertionDecl, Module, ModuleKind, StepMockDecl, Symbol,
    TestSkeleton,
};
use crate::scaffold::naming::snake_case;

use super::{Language, Renderer};

const INDENT: &str = "    ";

/// Renders generated modules as Rust source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl RustRenderer {
    /// Function name of a job's assertion.
    pub fn assertion_fn_name(job_id: &str) -> String {
        match snake_case(job_id) {
            s if s.is_empty() => "assert_job_executed".to_string(),
            s => format!("assert_{}_job_executed", s),
        }
    }

    fn header(module: &Module) -> String {
        match module.kind {
            ModuleKind::Mocks => format!(
                "//! Step mocks for the `{}` workflow.\n\
                 #![allow(dead_code, non_snake_case)]\n\
                 \n\
                 use workflow_fixtures::mock::MockStep;\n",
                module.workflow_name
            ),
            ModuleKind::Assertions => format!(
                "//! Step assertions for the `{}` workflow.\n\
                 #![allow(dead_code)]\n\
                 \n\
                 use workflow_fixtures::assertion::{{assert_steps, AssertionMismatch}};\n\
                 use workflow_fixtures::step::{{ExecutionTrace, StepIdentity}};\n",
                module.workflow_name
            ),
        }
    }

    fn visibility(module: &Module, item: &Item) -> &'static str {
        match item.symbol() {
            Some(symbol) if module.is_exported(&symbol) => "pub ",
            _ => "",
        }
    }

    fn section(job_id: &str, needs: &[String]) -> String {
        if needs.is_empty() {
            format!("// {}\n", job_id.to_lowercase())
        } else {
            format!(
                "// {} (needs: {})\n",
                job_id.to_lowercase(),
                needs.join(", ")
            )
        }
    }

    fn step_mock(vis: &str, decl: &StepMockDecl) -> String {
        let mut out = format!("{}fn {}() -> MockStep {{\n", vis, decl.ident);
        out.push_str(&format!("{}// add outputs if needed\n", INDENT));
        out.push_str(&format!("{}MockStep::new(\n", INDENT));
        for arg in [
            string_literal(&decl.name),
            string_literal(&decl.message),
            format!("Some({})", string_literal(&decl.job_id)),
            slice_literal(&decl.inputs),
            slice_literal(&decl.envs),
        ] {
            out.push_str(&format!("{}{}{},\n", INDENT, INDENT, arg));
        }
        out.push_str(&format!("{})\n}}\n", INDENT));
        out
    }

    fn mock_list(vis: &str, name: &str, members: &[String]) -> String {
        let mut out = format!("{}fn {}() -> Vec<MockStep> {{\n", vis, name);
        if members.is_empty() {
            out.push_str(&format!("{}vec![]\n", INDENT));
        } else {
            out.push_str(&format!("{}vec![\n", INDENT));
            for member in members {
                out.push_str(&format!("{}{}{}(),\n", INDENT, INDENT, member));
            }
            out.push_str(&format!("{}]\n", INDENT));
        }
        out.push_str("}\n");
        out
    }

    fn job_assertion(vis: &str, decl: &JobAssertionDecl) -> String {
        let mut out = format!(
            "{}fn {}(\n{}trace: &ExecutionTrace,\n{}did_execute: bool,\n) -> Result<(), AssertionMismatch> {{\n",
            vis,
            Self::assertion_fn_name(&decl.label),
            INDENT,
            INDENT
        );
        if decl.steps.is_empty() {
            out.push_str(&format!("{}let steps: Vec<StepIdentity> = vec![];\n", INDENT));
        } else {
            out.push_str(&format!("{}let steps: Vec<StepIdentity> = vec![\n", INDENT));
            for step in &decl.steps {
                out.push_str(&Self::expected_step(step));
            }
            out.push_str(&format!("{}];\n", INDENT));
        }
        out.push_str(&format!(
            "{}assert_steps(trace, &steps, did_execute)\n}}\n",
            INDENT
        ));
        out
    }

    fn expected_step(step: &ExpectedStepDecl) -> String {
        let pad = INDENT.repeat(2);
        let mut out = format!(
            "{}StepIdentity::new({}, Some({}), {})",
            pad,
            string_literal(&step.name),
            string_literal(&step.job_id),
            string_literal(&step.message)
        );
        if !step.inputs.is_empty() {
            out.push_str(&format!(
                "\n{}{}.with_inputs({})",
                pad,
                INDENT,
                pairs_literal(&step.inputs)
            ));
        }
        if !step.envs.is_empty() {
            out.push_str(&format!(
                "\n{}{}.with_envs({})",
                pad,
                INDENT,
                pairs_literal(&step.envs)
            ));
        }
        out.push_str(",\n");
        out
    }
}

impl Renderer for RustRenderer {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn render_module(&self, module: &Module) -> String {
        let mut out = Self::header(module);
        let mut after_section = false;
        for item in &module.items {
            if let Item::Section { job_id, needs } = item {
                out.push('\n');
                out.push_str(&Self::section(job_id, needs));
                after_section = true;
                continue;
            }
            if !after_section {
                out.push('\n');
            }
            after_section = false;

            let vis = Self::visibility(module, item);
            match item {
                Item::StepMock(decl) => out.push_str(&Self::step_mock(vis, decl)),
                Item::MockList { name, members } => {
                    out.push_str(&Self::mock_list(vis, name, members))
                }
                Item::JobAssertion(decl) => out.push_str(&Self::job_assertion(vis, decl)),
                Item::Section { .. } => {}
            }
        }
        out
    }

    fn render_test(&self, skeleton: &TestSkeleton) -> String {
        let wf = &skeleton.workflow_name;
        format!(
            r#"//! Tests for the `{wf}` workflow.
//!
//! Register this file as a `[[test]]` target in Cargo.toml to run it.
#![allow(unused_imports, unused_variables)]

#[path = "mocks/{mocks}.rs"]
mod mocks;
#[path = "assertions/{assertions}.rs"]
mod assertions;

use std::path::Path;

use workflow_fixtures::config::load_config;
use workflow_fixtures::mock::MockSteps;
use workflow_fixtures::repo::{{FileCopy, MockRepository}};
use workflow_fixtures::runner::{{
    log_file_path, run_with_timeout, ActRunner, RunOptions, WorkflowRunner,
}};

const REPO_NAME: &str = "test{repo}WorkflowRepo";

fn project_root() -> &'static Path {{
    Path::new(env!("CARGO_MANIFEST_DIR"))
}}

fn files_to_copy_into_test_repo() -> Vec<FileCopy> {{
    let root = project_root();
    vec![
        FileCopy::new(root.join(".github/actions"), ".github/actions"),
        FileCopy::new(root.join(".github/libs"), ".github/libs"),
        FileCopy::new(root.join(".github/scripts"), ".github/scripts"),
        FileCopy::new(
            root.join(".github/workflows/{wf}.yml"),
            ".github/workflows/{wf}.yml",
        ),
    ]
}}

#[test]
#[ignore = "fill in the event, payload and assertions"]
fn test_stub() -> workflow_fixtures::Result<()> {{
    let config = load_config(project_root(), None)?;

    // create a local repository and copy required files
    let repo = MockRepository::builder()
        .repo(REPO_NAME, files_to_copy_into_test_repo())
        .setup()?;
    let repo_path = repo
        .get_path(REPO_NAME)
        .map(Path::to_path_buf)
        .unwrap_or_default();

    // mock steps with the imported mocks, e.g.
    // .with_job("<job>", mocks::{prefix}__<JOB>__STEP_MOCKS())
    let test_mock_steps = MockSteps::new();

    // set up the event payload, secrets and env if needed
    let options = RunOptions::new(repo_path.join(".github/workflows/{wf}.yml"))
        .with_mock_steps(test_mock_steps)
        .with_actor("Dummy Author")
        .with_timeout(config.timeout())
        .with_log_file(log_file_path(&config.paths(project_root()).logs, "{wf}"));

    let runner = ActRunner::new(&repo_path).with_binary(config.act_binary.clone());
    let trace = run_with_timeout(config.timeout(), move || {{
        runner.run_event("[EVENT]", &options)
    }})?;

    // assert execution with the imported assertions, e.g.
    // assertions::assert_<job>_job_executed(&trace, true)?;

    repo.teardown()
}}
"#,
            wf = wf,
            mocks = skeleton.mocks_stem,
            assertions = skeleton.assertions_stem,
            repo = crate::scaffold::naming::pascal_case(wf),
            prefix = crate::scaffold::naming::workflow_prefix(wf),
        )
    }
}

/// A Rust string literal.
fn string_literal(s: &str) -> String {
    format!("{:?}", s)
}

fn slice_literal(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| string_literal(s)).collect();
    format!("&[{}]", inner.join(", "))
}

fn pairs_literal(pairs: &[(String, String)]) -> String {
    let inner: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("({}, {})", string_literal(k), string_literal(v)))
        .collect();
    format!("[{}]", inner.join(", "))
}
