//! Execution traces recorded by a workflow engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed step as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceStep {
    /// Step name.
    pub name: String,

    /// Exit status (0 = success).
    pub status: i32,

    /// Trimmed step output.
    pub output: String,
}

impl TraceStep {
    /// Create a trace record.
    pub fn new(name: impl Into<String>, status: i32, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            output: output.into(),
        }
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ name: {:?}, status: {}, output: {:?} }}",
            self.name, self.status, self.output
        )
    }
}

/// Ordered sequence of executed steps for one workflow run.
///
/// Order reflects execution order, but assertions treat the trace as an
/// unordered collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionTrace {
    steps: Vec<TraceStep>,
}

impl ExecutionTrace {
    /// Create a trace from recorded steps.
    pub fn new(steps: Vec<TraceStep>) -> Self {
        Self { steps }
    }

    /// Append a recorded step.
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// Recorded steps in execution order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Iterate recorded steps.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromIterator<TraceStep> for ExecutionTrace {
    fn from_iter<I: IntoIterator<Item = TraceStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl Extend<TraceStep> for ExecutionTrace {
    fn extend<I: IntoIterator<Item = TraceStep>>(&mut self, iter: I) {
        self.steps.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ExecutionTrace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
