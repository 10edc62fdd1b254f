//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::HarnessConfig;
use crate::error::{FixtureError, Result};

/// Directory holding the tool's own files.
pub const CONFIG_DIR: &str = ".wfx";

/// Project config location for a root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.wfx` directory first, then falls back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Parse YAML content into a [`HarnessConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<HarnessConfig> {
    if content.trim().is_empty() {
        return Ok(HarnessConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| FixtureError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project config, or the defaults if there is none.
///
/// With `config_override` the given file must exist.
///
/// # Errors
///
/// `Configuration` if the override file is missing, `ConfigParse` if the
/// YAML is invalid.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<HarnessConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => config_path(project_root),
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!("Loading config from {}", path.display());
            parse_config(&content, &path)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if config_override.is_some() {
                return Err(FixtureError::Configuration {
                    message: format!("config file {} does not exist", path.display()),
                });
            }
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(HarnessConfig::default())
        }
        Err(e) => Err(FixtureError::Io(e)),
    }
}
