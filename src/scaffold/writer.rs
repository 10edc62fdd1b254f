//! Writing generated files without overwriting anything.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, Result};

use super::naming::{assertions_file_stem, mocks_file_stem, test_file_stem};
use super::Scaffold;

/// Destination paths of the three generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldTargets {
    pub mocks: PathBuf,
    pub assertions: PathBuf,
    pub test: PathBuf,
}

impl ScaffoldTargets {
    /// Standard targets for a workflow.
    ///
    /// ```
    /// use std::path::Path;
    /// use workflow_fixtures::scaffold::ScaffoldTargets;
    ///
    /// let targets = ScaffoldTargets::new(
    ///     "deploy",
    ///     Path::new("tests/mocks"),
    ///     Path::new("tests/assertions"),
    ///     Path::new("tests"),
    ///     "rs",
    /// );
    /// assert_eq!(targets.mocks, Path::new("tests/mocks/deployMocks.rs"));
    /// assert_eq!(targets.test, Path::new("tests/deploy.test.rs"));
    /// ```
    pub fn new(
        workflow_name: &str,
        mocks_dir: &Path,
        assertions_dir: &Path,
        tests_dir: &Path,
        extension: &str,
    ) -> Self {
        Self {
            mocks: mocks_dir.join(format!("{}.{}", mocks_file_stem(workflow_name), extension)),
            assertions: assertions_dir.join(format!(
                "{}.{}",
                assertions_file_stem(workflow_name),
                extension
            )),
            test: tests_dir.join(format!("{}.{}", test_file_stem(workflow_name), extension)),
        }
    }

    fn entries(&self) -> [(&'static str, &Path); 3] {
        [
            ("mocks", self.mocks.as_path()),
            ("assertions", self.assertions.as_path()),
            ("test", self.test.as_path()),
        ]
    }

    /// First target that already exists, with its kind.
    pub fn existing(&self) -> Option<(&'static str, &Path)> {
        self.entries().into_iter().find(|(_, path)| path.exists())
    }

    /// Fail with `TargetExists` if any target is already present.
    pub fn ensure_absent(&self) -> Result<()> {
        match self.existing() {
            Some((kind, path)) => Err(FixtureError::TargetExists {
                kind: kind.to_string(),
                path: path.to_path_buf(),
            }),
            None => Ok(()),
        }
    }
}

/// Write all three files or none.
///
/// Every target is checked before anything is written. Files are created
/// with create-new semantics; on a failed write the files already written
/// by this call are removed again, along with the directories it created.
///
/// # Errors
///
/// `TargetExists` if any target is present, `Io` if a write fails.
pub fn write_scaffold(targets: &ScaffoldTargets, scaffold: &Scaffold) -> Result<Vec<PathBuf>> {
    targets.ensure_absent()?;

    let files = [
        (targets.mocks.as_path(), scaffold.mocks.as_str()),
        (targets.assertions.as_path(), scaffold.assertions.as_str()),
        (targets.test.as_path(), scaffold.test.as_str()),
    ];

    let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
    let mut created_dirs: Vec<PathBuf> = Vec::new();
    for (kind, (path, contents)) in ["mocks", "assertions", "test"].into_iter().zip(files) {
        match create_new(path, contents, &mut created_dirs) {
            Ok(()) => {
                tracing::info!("Created {} file {}", kind, path.display());
                written.push(path.to_path_buf());
            }
            Err(err) => {
                roll_back(&written, &created_dirs);
                if err.kind() == io::ErrorKind::AlreadyExists && path.exists() {
                    return Err(FixtureError::TargetExists {
                        kind: kind.to_string(),
                        path: path.to_path_buf(),
                    });
                }
                return Err(err.into());
            }
        }
    }
    Ok(written)
}

/// Create `path` and any missing parents, recording new directories in
/// `created_dirs` outermost first.
fn create_new(path: &Path, contents: &str, created_dirs: &mut Vec<PathBuf>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let mut missing: Vec<PathBuf> = parent
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(Path::to_path_buf)
            .collect();
        missing.reverse();
        created_dirs.extend(missing);
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

fn roll_back(written: &[PathBuf], created_dirs: &[PathBuf]) {
    for path in written {
        if let Err(err) = fs::remove_file(path) {
            tracing::warn!("Could not remove {}: {}", path.display(), err);
        }
    }
    for dir in created_dirs.iter().rev().filter(|dir| dir.exists()) {
        if let Err(err) = fs::remove_dir(dir) {
            tracing::warn!("Could not remove {}: {}", dir.display(), err);
        }
    }
}
