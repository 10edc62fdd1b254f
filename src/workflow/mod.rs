//! Workflow graph parsing.
//!
//! - [`parse`] / [`load_workflow`] - YAML to [`WorkflowGraph`]
//! - [`WorkflowGraph`], [`Job`], [`StepDecl`] - the parsed structure

pub mod graph;
pub mod parser;

pub use graph::{Job, StepDecl, WorkflowGraph};
pub use parser::{load_workflow, parse};
