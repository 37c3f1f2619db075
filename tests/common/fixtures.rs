//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{clone_repo, create_test_commit, git, setup_git_repo};

/// An upstream repository living outside of the scanned root
pub struct Origin {
    pub temp_dir: TempDir,
}

impl Origin {
    /// Creates an origin with a single commit on `main`
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        setup_git_repo(temp_dir.path())?;
        create_test_commit(temp_dir.path(), "README.md", "# Origin", "Initial commit")?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Adds a commit on the origin's checked-out branch
    pub fn commit(&self, file_name: &str) -> Result<()> {
        create_test_commit(self.path(), file_name, file_name, &format!("Add {file_name}"))
    }
}

/// A directory of repositories laid out like `host/user/name`, all cloned from one origin
pub struct RepoLayout {
    pub root: TempDir,
    pub origin: Origin,
}

/// Builder for creating repository layouts
pub struct RepoLayoutBuilder {
    clones: Vec<String>,
    local: Vec<String>,
}

impl RepoLayoutBuilder {
    pub fn new() -> Self {
        Self {
            clones: Vec::new(),
            local: Vec::new(),
        }
    }

    /// Adds a clone of the shared origin at a path relative to the root
    pub fn with_clone(mut self, relative: impl Into<String>) -> Self {
        self.clones.push(relative.into());
        self
    }

    /// Adds a repository without remotes at a path relative to the root
    pub fn with_local(mut self, relative: impl Into<String>) -> Self {
        self.local.push(relative.into());
        self
    }

    pub fn build(self) -> Result<RepoLayout> {
        let root = TempDir::new()?;
        let origin = Origin::new()?;

        for relative in &self.clones {
            clone_repo(origin.path(), &root.path().join(relative))?;
        }

        for relative in &self.local {
            let path = root.path().join(relative);
            std::fs::create_dir_all(&path)?;
            setup_git_repo(&path)?;
            create_test_commit(&path, "README.md", "# Local", "Initial commit")?;
        }

        Ok(RepoLayout { root, origin })
    }
}

impl RepoLayout {
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn repo(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Runs git inside one of the layout's repositories
    pub fn git(&self, relative: &str, args: &[&str]) -> Result<String> {
        git(&self.repo(relative), args)
    }
}
