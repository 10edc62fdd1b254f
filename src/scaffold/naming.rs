//! Identifier conventions for generated files.
//!
//! For workflow `X`, job `J` and step `S`:
//! - step mock: `X__J__S__STEP_MOCK`
//! - job mock list: `X__J__STEP_MOCKS`
//! - files: `XMocks.<ext>`, `XAssertions.<ext>`, `X.test.<ext>`

use std::collections::HashSet;

use crate::workflow::Job;

/// Placeholder value written for every declared parameter.
pub const FILL_IN: &str = "[FILL_IN]";

/// Uppercase, with every run of non-alphanumeric characters turned into a
/// single `_` and no leading or trailing `_`.
///
/// # Example
///
/// ```
/// use workflow_fixtures::scaffold::naming::upper_snake;
///
/// assert_eq!(upper_snake("Post the issue in the #expensify-open-source room"),
///            "POST_THE_ISSUE_IN_THE_EXPENSIFY_OPEN_SOURCE_ROOM");
/// ```
pub fn upper_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// `camelCase` / `kebab-case` / `Mixed Words` to `snake_case`.
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_numeric();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// `camelCase` / `kebab-case` to `PascalCase`.
pub fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Constant prefix for a workflow.
///
/// A name that does not start with a letter gets a `WF_` prefix so the
/// constants stay valid identifiers.
pub fn workflow_prefix(workflow_name: &str) -> String {
    let prefix = upper_snake(workflow_name);
    match prefix.chars().next() {
        Some(c) if c.is_alphabetic() => prefix,
        Some(_) => format!("WF_{}", prefix),
        None => "WF".to_string(),
    }
}

/// Name of one step mock.
pub fn step_mock_name(workflow_name: &str, job_id: &str, step_segment: &str) -> String {
    format!(
        "{}__{}__{}__STEP_MOCK",
        workflow_prefix(workflow_name),
        upper_snake(job_id),
        step_segment
    )
}

/// Name of a job's mock list.
pub fn job_mocks_name(workflow_name: &str, job_id: &str) -> String {
    format!(
        "{}__{}__STEP_MOCKS",
        workflow_prefix(workflow_name),
        upper_snake(job_id)
    )
}

/// Naming label for every job, in job order.
///
/// A job keeps its id unless its upper-snake, snake or Pascal form is
/// already taken by an earlier job (`build-docs` after `build_docs`); then
/// it gets `_2`, `_3`, ... so mock lists and assertion functions stay
/// distinct.
pub fn job_labels(jobs: &[Job]) -> Vec<String> {
    let mut used: [HashSet<String>; 3] = Default::default();
    jobs.iter()
        .map(|job| {
            let mut label = job.id.clone();
            let mut n = 2;
            while label_forms(&label)
                .iter()
                .zip(&used)
                .any(|(form, seen)| seen.contains(form))
            {
                label = format!("{}_{}", job.id, n);
                n += 1;
            }
            for (form, seen) in label_forms(&label).into_iter().zip(used.iter_mut()) {
                seen.insert(form);
            }
            label
        })
        .collect()
}

fn label_forms(label: &str) -> [String; 3] {
    [upper_snake(label), snake_case(label), pascal_case(label)]
}

/// Identifier segment for every step of a job, in step order.
///
/// Anonymous steps become `STEP_<n>` (1-based position). Repeated segments
/// get `_2`, `_3`, ... so no two steps of a job share an identifier.
pub fn step_segments(job: &Job) -> Vec<String> {
    let mut used = HashSet::new();
    job.steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let base = match upper_snake(&step.name) {
                s if s.is_empty() => format!("STEP_{}", index + 1),
                s => s,
            };
            let mut candidate = base.clone();
            let mut n = 2;
            while used.contains(&candidate) {
                candidate = format!("{}_{}", base, n);
                n += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// File name stem of the mocks module.
pub fn mocks_file_stem(workflow_name: &str) -> String {
    format!("{}Mocks", workflow_name)
}

/// File name stem of the assertions module.
pub fn assertions_file_stem(workflow_name: &str) -> String {
    format!("{}Assertions", workflow_name)
}

/// File name stem of the test skeleton.
pub fn test_file_stem(workflow_name: &str) -> String {
    format!("{}.test", workflow_name)
}
