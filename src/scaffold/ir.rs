//! Language-neutral description of generated files.

use serde::Serialize;

/// What a generated module holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Mocks,
    Assertions,
}

/// One generated module: items in output order plus the exported symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub workflow_name: String,
    pub kind: ModuleKind,
    pub items: Vec<Item>,
    pub exports: Vec<Symbol>,
}

impl Module {
    /// Whether `symbol` is part of the module's public surface.
    pub fn is_exported(&self, symbol: &Symbol) -> bool {
        self.exports.contains(symbol)
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// Comment heading a job's items.
    Section { job_id: String, needs: Vec<String> },
    StepMock(StepMockDecl),
    MockList { name: String, members: Vec<String> },
    JobAssertion(JobAssertionDecl),
}

impl Item {
    /// The symbol this item defines, if any.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Item::Section { .. } => None,
            Item::StepMock(decl) => Some(Symbol::Value(decl.ident.clone())),
            Item::MockList { name, .. } => Some(Symbol::Value(name.clone())),
            Item::JobAssertion(decl) => Some(Symbol::JobAssertion(decl.label.clone())),
        }
    }
}

/// A named symbol. Assertion function names depend on the target language,
/// so they are identified by job label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Symbol {
    Value(String),
    JobAssertion(String),
}

/// A mock factory for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMockDecl {
    pub ident: String,
    pub name: String,
    pub message: String,
    pub job_id: String,
    pub inputs: Vec<String>,
    pub envs: Vec<String>,
}

/// Expected steps of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobAssertionDecl {
    /// Job id, suffixed when another job's id names the same function.
    pub label: String,
    pub steps: Vec<ExpectedStepDecl>,
}

/// One expected step with placeholder parameter values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedStepDecl {
    pub name: String,
    pub message: String,
    pub job_id: String,
    pub inputs: Vec<(String, String)>,
    pub envs: Vec<(String, String)>,
}

/// A test file wired to the generated mocks and assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSkeleton {
    pub workflow_name: String,
    pub mocks_stem: String,
    pub assertions_stem: String,
}
