//! Throwaway repositories for workflow runs.
//!
//! A [`MockRepository`] materializes one or more named repositories under a
//! single temporary directory. Everything is removed on
//! [`teardown`](MockRepository::teardown) or when the value is dropped, so
//! a panicking test leaves nothing behind.
//!
//! # Example
//!
//! ```
//! use std::fs;
//! use workflow_fixtures::repo::{FileCopy, MockRepository};
//!
//! let source = tempfile::tempdir().unwrap();
//! fs::write(source.path().join("deploy.yml"), "jobs: {}").unwrap();
//!
//! let repo = MockRepository::builder()
//!     .repo("app", vec![FileCopy::new(source.path().join("deploy.yml"), ".github/workflows/deploy.yml")])
//!     .setup()
//!     .unwrap();
//!
//! let path = repo.get_path("app").unwrap();
//! assert!(path.join(".github/workflows/deploy.yml").is_file());
//! repo.teardown().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{FixtureError, Result};

/// One entry of a repository manifest: copy `src` (file or directory) to
/// `dest`, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    pub src: PathBuf,
    pub dest: PathBuf,
}

impl FileCopy {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct RepoSpec {
    name: String,
    files: Vec<FileCopy>,
}

/// Builder for [`MockRepository`].
#[derive(Debug, Clone, Default)]
pub struct MockRepositoryBuilder {
    repos: Vec<RepoSpec>,
    init_git: bool,
}

impl MockRepositoryBuilder {
    /// Add a repository populated from `files`.
    pub fn repo(mut self, name: impl Into<String>, files: Vec<FileCopy>) -> Self {
        self.repos.push(RepoSpec {
            name: name.into(),
            files,
        });
        self
    }

    /// Run `git init` and commit the copied files in every repository.
    pub fn init_git(mut self, init_git: bool) -> Self {
        self.init_git = init_git;
        self
    }

    /// Materialize every repository.
    ///
    /// Manifest entries whose source does not exist are skipped with a
    /// warning, so a shared manifest can list optional directories.
    ///
    /// # Errors
    ///
    /// `RepositorySetup` if a repository name is duplicated or unsafe, a
    /// copy fails, or `git` fails.
    pub fn setup(self) -> Result<MockRepository> {
        let root = tempfile::Builder::new().prefix("wfx-repo").tempdir()?;
        let mut repos = Vec::with_capacity(self.repos.len());

        for entry in self.repos {
            let path = root.path().join(&entry.name);
            let setup_error = |message: String| FixtureError::RepositorySetup {
                path: path.clone(),
                message,
            };

            if !is_plain_name(&entry.name) {
                return Err(setup_error(format!(
                    "repository name '{}' must be a single path component",
                    entry.name
                )));
            }
            if repos.iter().any(|(name, _): &(String, PathBuf)| *name == entry.name) {
                return Err(setup_error(format!(
                    "repository '{}' declared twice",
                    entry.name
                )));
            }

            fs::create_dir_all(&path).map_err(|e| setup_error(e.to_string()))?;
            for file in &entry.files {
                if !file.src.exists() {
                    tracing::warn!("Skipping missing source {}", file.src.display());
                    continue;
                }
                copy_recursive(&file.src, &path.join(&file.dest))
                    .map_err(|e| setup_error(format!("copying {}: {}", file.src.display(), e)))?;
            }

            if self.init_git {
                init_git_repo(&path).map_err(setup_error)?;
            }

            tracing::debug!("Set up mock repository '{}' at {}", entry.name, path.display());
            repos.push((entry.name, path));
        }

        Ok(MockRepository {
            root: Some(root),
            repos,
        })
    }
}

/// Scoped throwaway repositories.
#[derive(Debug)]
pub struct MockRepository {
    root: Option<TempDir>,
    repos: Vec<(String, PathBuf)>,
}

impl MockRepository {
    pub fn builder() -> MockRepositoryBuilder {
        MockRepositoryBuilder::default()
    }

    /// Path of a named repository.
    pub fn get_path(&self, name: &str) -> Option<&Path> {
        self.repos
            .iter()
            .find(|(repo, _)| repo == name)
            .map(|(_, path)| path.as_path())
    }

    /// Directory holding every repository.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_ref().map(TempDir::path)
    }

    /// Remove everything, reporting any failure.
    pub fn teardown(mut self) -> Result<()> {
        match self.root.take() {
            Some(root) => root.close().map_err(FixtureError::Io),
            None => Ok(()),
        }
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

fn copy_recursive(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest).map(|_| ())
    }
}

fn init_git_repo(path: &Path) -> std::result::Result<(), String> {
    let steps: [&[&str]; 3] = [
        &["init", "--quiet", "--initial-branch=main"],
        &["add", "--all"],
        &["commit", "--quiet", "--allow-empty", "-m", "Initial commit"],
    ];
    for args in steps {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .env("GIT_AUTHOR_NAME", "Dummy Author")
            .env("GIT_AUTHOR_EMAIL", "dummy@example.com")
            .env("GIT_COMMITTER_NAME", "Dummy Author")
            .env("GIT_COMMITTER_EMAIL", "dummy@example.com")
            .output()
            .map_err(|e| format!("failed to run git: {}", e))?;
        if !output.status.success() {
            return Err(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
    }
    Ok(())
}
