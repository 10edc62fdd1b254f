//! The generator command.
//!
//! `wfx deploy.yml` reads `<workflows_dir>/deploy.yml` and writes
//! `deployMocks`, `deployAssertions` and `deploy.test` next to the other
//! workflow tests. Existing files are never touched.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::load_config;
use crate::error::{FixtureError, Result};
use crate::scaffold::{self, write_scaffold, Language, ScaffoldTargets};
use crate::ui::UserInterface;
use crate::workflow::load_workflow;

use super::{Command, CommandResult};

static WORKFLOW_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\.yml$").expect("workflow file name regex must compile"));

/// Generates the scaffold for one workflow file.
pub struct GenerateCommand {
    project_root: PathBuf,
    workflow: Option<String>,
    config: Option<PathBuf>,
    language: Option<Language>,
}

impl GenerateCommand {
    pub fn new(project_root: &Path, workflow: Option<String>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            workflow,
            config: None,
            language: None,
        }
    }

    /// Use this config file instead of `.wfx/config.yml`.
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Override the configured output language.
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    /// Workflow name (file stem) from a validated file name.
    fn workflow_name(&self) -> Result<(&str, &str)> {
        let file_name = self
            .workflow
            .as_deref()
            .ok_or(FixtureError::MissingWorkflowArgument)?;

        if !WORKFLOW_FILE_NAME.is_match(file_name) {
            return Err(FixtureError::InvalidWorkflowFileName {
                name: file_name.to_string(),
            });
        }
        let name = file_name.trim_end_matches(".yml");
        Ok((file_name, name))
    }

    fn generate(&self, ui: &mut dyn UserInterface) -> Result<Vec<PathBuf>> {
        let (file_name, workflow_name) = self.workflow_name()?;

        let config = load_config(&self.project_root, self.config.as_deref())?;
        let paths = config.paths(&self.project_root);
        let language = self.language.unwrap_or(config.language);

        let workflow_path = paths.workflows.join(file_name);
        if !workflow_path.is_file() {
            return Err(FixtureError::WorkflowNotFound {
                path: workflow_path,
            });
        }

        let renderer = language.renderer();
        let targets = ScaffoldTargets::new(
            workflow_name,
            &paths.mocks,
            &paths.assertions,
            &paths.tests,
            renderer.extension(),
        );
        targets.ensure_absent()?;

        let graph = load_workflow(&workflow_path)?;
        tracing::debug!(
            "Parsed {} with {} jobs and {} steps",
            workflow_path.display(),
            graph.jobs.len(),
            graph.step_count()
        );
        ui.message(&format!(
            "Generating {} scaffold for {}",
            language,
            workflow_path.display()
        ));

        let generated = scaffold::generate(workflow_name, &graph, renderer.as_ref());
        let written = write_scaffold(&targets, &generated)?;

        for (kind, path) in ["Mocks", "Assertions", "Test"].iter().zip(&written) {
            ui.success(&format!("{} file written to {}", kind, path.display()));
        }
        Ok(written)
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.generate(ui) {
            Ok(_) => Ok(CommandResult::success()),
            Err(e)
                if e.is_configuration_error()
                    || matches!(e, FixtureError::WorkflowParse { .. }) =>
            {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
