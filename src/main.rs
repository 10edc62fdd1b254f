//! `wfx` entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use workflow_fixtures::cli::{Cli, CommandDispatcher};
use workflow_fixtures::config::find_project_root;
use workflow_fixtures::ui::{TerminalUI, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("workflow_fixtures=debug,wfx=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("workflow_fixtures=info,wfx=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("wfx starting with args: {:?}", cli);

    let mut ui = TerminalUI::new(cli.no_color).quiet(cli.quiet);

    let project_root = match &cli.project {
        Some(project) => project.clone(),
        None => match std::env::current_dir() {
            Ok(cwd) => find_project_root(&cwd).unwrap_or(cwd),
            Err(e) => {
                ui.error(&format!("Error: cannot read current directory: {}", e));
                return ExitCode::from(1);
            }
        },
    };

    let dispatcher = CommandDispatcher::new(project_root);
    tracing::debug!("Project root: {}", dispatcher.project_root().display());

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code.clamp(0, 255) as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
