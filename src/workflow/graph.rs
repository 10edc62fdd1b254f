//! Parsed workflow graph.

use serde::Serialize;

/// A workflow: jobs in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowGraph {
    /// Workflow `name:` if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Jobs in declaration order.
    pub jobs: Vec<Job>,
}

impl WorkflowGraph {
    /// Look up a job by its declared id.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Job ids in declaration order.
    pub fn job_ids(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|j| j.id.as_str())
    }

    /// Total number of step declarations across all jobs.
    pub fn step_count(&self) -> usize {
        self.jobs.iter().map(|j| j.steps.len()).sum()
    }
}

/// One job: an ordered list of step declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Job {
    /// Job id as declared (the key under `jobs:`).
    pub id: String,

    /// Jobs this one `needs:`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,

    /// Steps in declaration order.
    pub steps: Vec<StepDecl>,
}

impl Job {
    /// Find a step by `id:` if given, otherwise by name.
    pub fn find_step(&self, name: &str, id: Option<&str>) -> Option<&StepDecl> {
        match id {
            Some(id) => self.steps.iter().find(|s| s.id.as_deref() == Some(id)),
            None => self.steps.iter().find(|s| s.name == name),
        }
    }
}

/// A step declaration: name and parameter keys, no values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepDecl {
    /// Declared name, empty for anonymous steps.
    pub name: String,

    /// Declared `id:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Keys of the `with:` mapping.
    pub inputs: Vec<String>,

    /// Keys of the `env:` mapping.
    pub envs: Vec<String>,
}

impl StepDecl {
    /// Whether the step has no name.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}
