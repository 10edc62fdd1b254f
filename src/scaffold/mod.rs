//! Scaffold generation.
//!
//! Derives three files from a parsed workflow:
//!
//! - a mocks module with one factory per step and one list per job
//! - an assertions module with one function per job, every parameter value
//!   left as a `[FILL_IN]` placeholder
//! - a test skeleton wired to both modules
//!
//! Generation builds a language-neutral [`Module`] first and a
//! [`Renderer`] turns it into source text. Output depends only on the
//! workflow name and graph, so it is byte-identical across runs.

pub mod ir;
pub mod naming;
pub mod render;
pub mod writer;

pub use ir::{
    ExpectedStepDecl, Item, JobAssertionDecl, Module, ModuleKind, StepMockDecl, Symbol,
    TestSkeleton,
};
pub use naming::FILL_IN;
pub use render::{JavaScriptRenderer, Language, Renderer, RustRenderer};
pub use writer::{write_scaffold, ScaffoldTargets};

use crate::workflow::WorkflowGraph;

/// Rendered contents of the three generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub mocks: String,
    pub assertions: String,
    pub test: String,
}

/// Build the mocks module for a workflow.
pub fn mocks_module(workflow_name: &str, graph: &WorkflowGraph) -> Module {
    let mut items = Vec::new();
    let mut exports = Vec::new();

    for (job, label) in graph.jobs.iter().zip(naming::job_labels(&graph.jobs)) {
        items.push(Item::Section {
            job_id: job.id.clone(),
            needs: job.needs.clone(),
        });

        let job_tag = job.id.to_uppercase();
        let mut members = Vec::with_capacity(job.steps.len());
        for (step, segment) in job.steps.iter().zip(naming::step_segments(job)) {
            let ident = naming::step_mock_name(workflow_name, &label, &segment);
            members.push(ident.clone());
            items.push(Item::StepMock(StepMockDecl {
                ident,
                name: step.name.clone(),
                message: step.name.clone(),
                job_id: job_tag.clone(),
                inputs: step.inputs.clone(),
                envs: step.envs.clone(),
            }));
        }

        let list = naming::job_mocks_name(workflow_name, &label);
        exports.push(Symbol::Value(list.clone()));
        items.push(Item::MockList {
            name: list,
            members,
        });
    }

    Module {
        workflow_name: workflow_name.to_string(),
        kind: ModuleKind::Mocks,
        items,
        exports,
    }
}

/// Build the assertions module for a workflow.
pub fn assertions_module(workflow_name: &str, graph: &WorkflowGraph) -> Module {
    let placeholders = |keys: &[String]| -> Vec<(String, String)> {
        keys.iter()
            .map(|k| (k.clone(), FILL_IN.to_string()))
            .collect()
    };

    let mut items = Vec::new();
    let mut exports = Vec::new();
    for (job, label) in graph.jobs.iter().zip(naming::job_labels(&graph.jobs)) {
        let job_tag = job.id.to_uppercase();
        let steps = job
            .steps
            .iter()
            .map(|step| ExpectedStepDecl {
                name: step.name.clone(),
                message: step.name.clone(),
                job_id: job_tag.clone(),
                inputs: placeholders(&step.inputs),
                envs: placeholders(&step.envs),
            })
            .collect();
        exports.push(Symbol::JobAssertion(label.clone()));
        items.push(Item::JobAssertion(JobAssertionDecl { label, steps }));
    }

    Module {
        workflow_name: workflow_name.to_string(),
        kind: ModuleKind::Assertions,
        items,
        exports,
    }
}

/// Render the mocks file.
pub fn generate_mocks(
    workflow_name: &str,
    graph: &WorkflowGraph,
    renderer: &dyn Renderer,
) -> String {
    renderer.render_module(&mocks_module(workflow_name, graph))
}

/// Render the assertions file.
pub fn generate_assertions(
    workflow_name: &str,
    graph: &WorkflowGraph,
    renderer: &dyn Renderer,
) -> String {
    renderer.render_module(&assertions_module(workflow_name, graph))
}

/// Render the test skeleton.
pub fn generate_test_skeleton(workflow_name: &str, renderer: &dyn Renderer) -> String {
    renderer.render_test(&TestSkeleton {
        workflow_name: workflow_name.to_string(),
        mocks_stem: naming::mocks_file_stem(workflow_name),
        assertions_stem: naming::assertions_file_stem(workflow_name),
    })
}

/// Render all three files.
pub fn generate(workflow_name: &str, graph: &WorkflowGraph, renderer: &dyn Renderer) -> Scaffold {
    tracing::debug!(
        "Generating {} scaffold for '{}' ({} jobs, {} steps)",
        renderer.language(),
        workflow_name,
        graph.jobs.len(),
        graph.step_count()
    );
    Scaffold {
        mocks: generate_mocks(workflow_name, graph, renderer),
        assertions: generate_assertions(workflow_name, graph, renderer),
        test: generate_test_skeleton(workflow_name, renderer),
    }
}
