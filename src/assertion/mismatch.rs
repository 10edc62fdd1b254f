//! Assertion failure reports.

use std::fmt;

use crate::step::{ExecutionTrace, MockLine, StepIdentity, TraceStep, MOCK_MARKER};

/// How many near misses a report lists.
pub const NEAREST_LIMIT: usize = 3;

/// Which way containment failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// The step was expected but no trace entry matched.
    Missing,
    /// The step was expected to be absent but a trace entry matched.
    Unexpected,
}

/// A trace entry close to (or equal to) the expected step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestEntry {
    /// Position in the trace.
    pub index: usize,

    /// The recorded step.
    pub step: TraceStep,

    /// Field-by-field differences from the expected record.
    pub differences: Vec<String>,
}

/// A failed presence or absence assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionMismatch {
    /// Which assertion failed.
    pub kind: MismatchKind,

    /// The full expected step.
    pub expected: StepIdentity,

    /// The record the expected step would produce, if it runs.
    pub expected_record: Option<TraceStep>,

    /// Closest trace entries; for `Unexpected`, the matching ones.
    pub nearest: Vec<NearestEntry>,

    /// Size of the searched trace.
    pub trace_len: usize,
}

impl AssertionMismatch {
    /// Build a report for a step missing from `trace`.
    pub fn missing(trace: &ExecutionTrace, expected: &StepIdentity) -> Self {
        let expected_record = expected.to_trace_step();
        let nearest = expected_record
            .as_ref()
            .map(|record| nearest_entries(trace, record))
            .unwrap_or_default();
        Self {
            kind: MismatchKind::Missing,
            expected: expected.clone(),
            expected_record,
            nearest,
            trace_len: trace.len(),
        }
    }

    /// Build a report for a step that should not be in `trace`.
    pub fn unexpected(trace: &ExecutionTrace, expected: &StepIdentity) -> Self {
        let nearest = trace
            .iter()
            .enumerate()
            .filter(|(_, record)| expected.matches(record))
            .take(NEAREST_LIMIT)
            .map(|(index, step)| NearestEntry {
                index,
                step: step.clone(),
                differences: Vec::new(),
            })
            .collect();
        Self {
            kind: MismatchKind::Unexpected,
            expected: expected.clone(),
            expected_record: expected.to_trace_step(),
            nearest,
            trace_len: trace.len(),
        }
    }
}

impl fmt::Display for AssertionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MismatchKind::Missing => {
                writeln!(f, "expected step missing from trace: {}", self.expected)?
            }
            MismatchKind::Unexpected => {
                writeln!(f, "step unexpectedly present in trace: {}", self.expected)?
            }
        }

        match &self.expected_record {
            Some(record) => writeln!(f, "  expected record: {}", record)?,
            None => writeln!(f, "  expected step does not run, so it never appears in a trace")?,
        }

        if self.trace_len == 0 {
            return write!(f, "  trace is empty");
        }
        if self.nearest.is_empty() {
            return write!(
                f,
                "  no similar entries among {} trace steps",
                self.trace_len
            );
        }

        let heading = match self.kind {
            MismatchKind::Missing => "nearest trace entries",
            MismatchKind::Unexpected => "matching trace entries",
        };
        write!(f, "  {} ({} steps in trace):", heading, self.trace_len)?;
        for entry in &self.nearest {
            write!(f, "\n    #{} {}", entry.index, entry.step)?;
            for difference in &entry.differences {
                write!(f, "\n      {}", difference)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for AssertionMismatch {}

/// Rank trace entries by similarity to the expected record.
///
/// An entry qualifies if it has the same name or shares more than the mock
/// marker as an output prefix. Ties keep trace order.
fn nearest_entries(trace: &ExecutionTrace, expected: &TraceStep) -> Vec<NearestEntry> {
    let marker_len = MOCK_MARKER.len() + 1;
    let mut scored: Vec<(usize, usize, &TraceStep)> = trace
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let same_name = record.name == expected.name;
            let prefix = common_prefix_len(&record.output, &expected.output);
            if !same_name && prefix <= marker_len {
                return None;
            }
            let score = usize::from(same_name) * 10_000
                + prefix
                + usize::from(record.status == expected.status);
            Some((score, index, record))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(NEAREST_LIMIT)
        .map(|(_, index, record)| NearestEntry {
            index,
            step: record.clone(),
            differences: differences(expected, record),
        })
        .collect()
}

fn differences(expected: &TraceStep, found: &TraceStep) -> Vec<String> {
    let mut out = Vec::new();
    if expected.name != found.name {
        out.push(format!(
            "name: expected {:?}, found {:?}",
            expected.name, found.name
        ));
    }
    if expected.status != found.status {
        out.push(format!(
            "status: expected {}, found {}",
            expected.status, found.status
        ));
    }
    if expected.output == found.output {
        return out;
    }
    match (MockLine::parse(&expected.output), MockLine::parse(&found.output)) {
        (Some(want), Some(got)) => {
            if want.headline != got.headline {
                out.push(format!(
                    "headline: expected {:?}, found {:?}",
                    want.headline, got.headline
                ));
            }
            if want.inputs != got.inputs {
                out.push(format!("inputs: expected {}, found {}", want.inputs, got.inputs));
            }
            if want.envs != got.envs {
                out.push(format!("envs: expected {}, found {}", want.envs, got.envs));
            }
        }
        _ => out.push(format!(
            "output: expected {:?}, found {:?}",
            expected.output, found.output
        )),
    }
    out
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
