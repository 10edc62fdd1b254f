//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::scaffold::Language;

/// Generate mocks, assertions and a test skeleton for a CI workflow.
#[derive(Debug, Parser)]
#[command(name = "wfx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workflow file name, e.g. `deploy.yml`, looked up in the workflows directory
    pub workflow: Option<String>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, env = "WFX_PROJECT")]
    pub project: Option<PathBuf>,

    /// Path to config file (overrides default .wfx/config.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Language of the generated files (overrides the configured language)
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
