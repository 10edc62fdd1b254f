//! Workflow YAML parsing.
//!
//! Walks a workflow document into a [`WorkflowGraph`]. Only the structure
//! the generator needs is kept: job ids, `needs:`, and for every step its
//! name, `id:`, and the keys of `with:` and `env:`.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use crate::error::{FixtureError, Result};
use crate::workflow::graph::{Job, StepDecl, WorkflowGraph};

/// Parse workflow YAML text.
///
/// # Example
///
/// ```
/// use workflow_fixtures::workflow::parse;
///
/// let graph = parse(r#"
/// jobs:
///   validate:
///     steps:
///       - name: Checkout
///         with:
///           token: ${{ secrets.TOKEN }}
/// "#).unwrap();
///
/// let step = &graph.jobs[0].steps[0];
/// assert_eq!(step.name, "Checkout");
/// assert_eq!(step.inputs, vec!["token"]);
/// ```
pub fn parse(yaml: &str) -> Result<WorkflowGraph> {
    parse_named(yaml, "<input>")
}

/// Read and parse a workflow file.
///
/// # Errors
///
/// Returns `WorkflowNotFound` if the file doesn't exist.
/// Returns `WorkflowParse` if the YAML is malformed.
pub fn load_workflow(path: &Path) -> Result<WorkflowGraph> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FixtureError::WorkflowNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FixtureError::Io(e)
        }
    })?;

    parse_named(&content, &path.display().to_string())
}

fn parse_named(yaml: &str, origin: &str) -> Result<WorkflowGraph> {
    let parse_error = |message: String| FixtureError::WorkflowParse {
        origin: origin.to_string(),
        message,
    };

    let doc: Value = serde_yaml::from_str(yaml).map_err(|e| parse_error(e.to_string()))?;
    let root = doc
        .as_mapping()
        .ok_or_else(|| parse_error("workflow document must be a mapping".into()))?;

    let name = root.get("name").and_then(scalar_to_string);
    let jobs = root
        .get("jobs")
        .and_then(Value::as_mapping)
        .ok_or_else(|| parse_error("missing `jobs` mapping".into()))?;

    let mut graph = WorkflowGraph {
        name,
        jobs: Vec::with_capacity(jobs.len()),
    };

    for (key, value) in jobs {
        let id = scalar_to_string(key)
            .ok_or_else(|| parse_error("job ids must be scalars".into()))?;
        let job = parse_job(&id, value).map_err(parse_error)?;
        tracing::debug!("Parsed job '{}' with {} steps", job.id, job.steps.len());
        graph.jobs.push(job);
    }

    Ok(graph)
}

fn parse_job(id: &str, value: &Value) -> std::result::Result<Job, String> {
    let job = value
        .as_mapping()
        .ok_or_else(|| format!("job `{}` must be a mapping", id))?;

    let needs = match job.get("needs") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
    };

    // Jobs calling a reusable workflow have no steps of their own.
    let steps = match job.get("steps") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(index, step)| parse_step(id, index, step))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        Some(_) => return Err(format!("`steps` of job `{}` must be a sequence", id)),
    };

    Ok(Job {
        id: id.to_string(),
        needs,
        steps,
    })
}

fn parse_step(job_id: &str, index: usize, value: &Value) -> std::result::Result<StepDecl, String> {
    let step = value
        .as_mapping()
        .ok_or_else(|| format!("step {} of job `{}` must be a mapping", index + 1, job_id))?;

    Ok(StepDecl {
        name: step
            .get("name")
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        id: step.get("id").and_then(scalar_to_string),
        inputs: mapping_keys(step, "with"),
        envs: mapping_keys(step, "env"),
    })
}

/// Keys of a nested mapping, in declaration order; empty if absent.
fn mapping_keys(parent: &Mapping, field: &str) -> Vec<String> {
    parent
        .get(field)
        .and_then(Value::as_mapping)
        .map(|m| m.keys().filter_map(scalar_to_string).collect())
        .unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
