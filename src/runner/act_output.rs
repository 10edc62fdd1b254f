//! Parsing `act` console output into a trace.
//!
//! `act` prefixes every line with `[<workflow>/<job>]`. Per job, a step
//! opens with `⭐ Run <phase> <name>`, its output lines start with `|`, and
//! it closes with `✅ Success - <phase> <name>` or `❌ Failure - ...`.
//! Jobs may interleave, so open steps are tracked per prefix. Composite
//! actions nest steps inside a job, so each prefix keeps a stack and a
//! closing line ends the innermost open step.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::step::{ExecutionTrace, TraceStep, STATUS_FAILURE, STATUS_SUCCESS};

static RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<tag>[^\]]+)\]\s+⭐\s+Run\s+(?P<name>.+?)\s*$")
        .expect("RUN_REGEX must compile")
});

static OUTPUT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<tag>[^\]]+)\]\s+\|\s?(?P<text>.*)$").expect("OUTPUT_REGEX must compile")
});

static DONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(?P<tag>[^\]]+)\]\s+(?:✅|❌)\s+(?P<outcome>Success|Failure)\s+-\s+(?P<name>.+?)(?:\s+\[[^\]]*\])?\s*$",
    )
    .expect("DONE_REGEX must compile")
});

/// Step phase as `act` labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pre,
    Main,
    Post,
}

/// Split `Main Checkout` into phase and step name. Unlabelled steps (older
/// `act` releases) count as main.
fn split_phase(label: &str) -> (Phase, &str) {
    if let Some(name) = label.strip_prefix("Main ") {
        (Phase::Main, name)
    } else if let Some(name) = label.strip_prefix("Pre ") {
        (Phase::Pre, name)
    } else if let Some(name) = label.strip_prefix("Post ") {
        (Phase::Post, name)
    } else {
        (Phase::Main, label)
    }
}

struct OpenStep {
    name: String,
    phase: Phase,
    lines: Vec<String>,
}

/// Build a trace from complete `act` output.
///
/// Only main-phase steps are recorded, in completion order, so a composite
/// step follows the steps nested in it. Steps still open when the output
/// ends are dropped.
///
/// # Example
///
/// ```
/// use workflow_fixtures::runner::parse_trace;
///
/// let output = "\
/// [Deploy/build] ⭐ Run Main Checkout
/// [Deploy/build]   | [MOCK] BUILD Checkout
/// [Deploy/build]   ✅  Success - Main Checkout
/// ";
/// let trace = parse_trace(output);
/// assert_eq!(trace.len(), 1);
/// assert_eq!(trace.steps()[0].output, "[MOCK] BUILD Checkout");
/// ```
pub fn parse_trace(output: &str) -> ExecutionTrace {
    let mut open: HashMap<String, Vec<OpenStep>> = HashMap::new();
    let mut trace = ExecutionTrace::default();

    for line in output.lines() {
        if let Some(caps) = RUN_REGEX.captures(line) {
            let (phase, name) = split_phase(&caps["name"]);
            open.entry(caps["tag"].to_string()).or_default().push(OpenStep {
                name: name.to_string(),
                phase,
                lines: Vec::new(),
            });
        } else if let Some(caps) = DONE_REGEX.captures(line) {
            let Some(step) = open.get_mut(&caps["tag"]).and_then(Vec::pop) else {
                continue;
            };
            if step.phase != Phase::Main {
                continue;
            }
            let status = if &caps["outcome"] == "Success" {
                STATUS_SUCCESS
            } else {
                STATUS_FAILURE
            };
            trace.push(TraceStep::new(
                step.name,
                status,
                step.lines.join("\n").trim().to_string(),
            ));
        } else if let Some(caps) = OUTPUT_REGEX.captures(line) {
            if let Some(step) = open.get_mut(&caps["tag"]).and_then(|stack| stack.last_mut()) {
                step.lines.push(caps["text"].to_string());
            }
        }
    }

    let unfinished: usize = open.values().map(Vec::len).sum();
    if unfinished > 0 {
        tracing::debug!("{} steps still open at end of output", unfinished);
    }
    trace
}
