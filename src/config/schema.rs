//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scaffold::Language;

/// Settings from `.wfx/config.yml`. Every field is optional.
///
/// Relative directories resolve against the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Where workflow definitions live.
    pub workflows_dir: PathBuf,

    /// Where test skeletons are written.
    pub tests_dir: PathBuf,

    /// Where mocks modules are written.
    pub mocks_dir: PathBuf,

    /// Where assertions modules are written.
    pub assertions_dir: PathBuf,

    /// Where run logs go.
    pub logs_dir: PathBuf,

    /// Language of generated files.
    pub language: Language,

    /// Upper bound on one workflow run, in seconds.
    pub timeout_secs: u64,

    /// `act` executable used by generated tests.
    pub act_binary: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workflows_dir: PathBuf::from(".github/workflows"),
            tests_dir: PathBuf::from("workflow_tests"),
            mocks_dir: PathBuf::from("workflow_tests/mocks"),
            assertions_dir: PathBuf::from("workflow_tests/assertions"),
            logs_dir: PathBuf::from("workflow_tests/logs"),
            language: Language::default(),
            timeout_secs: 60,
            act_binary: crate::runner::act::DEFAULT_ACT_BINARY.to_string(),
        }
    }
}

impl HarnessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve every directory against `project_root`.
    pub fn paths(&self, project_root: &Path) -> ProjectPaths {
        ProjectPaths {
            workflows: project_root.join(&self.workflows_dir),
            tests: project_root.join(&self.tests_dir),
            mocks: project_root.join(&self.mocks_dir),
            assertions: project_root.join(&self.assertions_dir),
            logs: project_root.join(&self.logs_dir),
        }
    }
}

/// Absolute locations derived from a [`HarnessConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub workflows: PathBuf,
    pub tests: PathBuf,
    pub mocks: PathBuf,
    pub assertions: PathBuf,
    pub logs: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layout() {
        let config = HarnessConfig::default();
        assert_eq!(config.workflows_dir, PathBuf::from(".github/workflows"));
        assert_eq!(config.mocks_dir, PathBuf::from("workflow_tests/mocks"));
        assert_eq!(config.language, Language::Rust);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.act_binary, "act");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: HarnessConfig =
            serde_yaml::from_str("language: js\ntimeout_secs: 5\n").unwrap();
        assert_eq!(config.language, Language::JavaScript);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.tests_dir, PathBuf::from("workflow_tests"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<HarnessConfig, _> = serde_yaml::from_str("langauge: js\n");
        assert!(result.is_err());
    }

    #[test]
    fn paths_resolve_against_root() {
        let paths = HarnessConfig::default().paths(Path::new("/project"));
        assert_eq!(paths.workflows, PathBuf::from("/project/.github/workflows"));
        assert_eq!(paths.assertions, PathBuf::from("/project/workflow_tests/assertions"));
    }
}
