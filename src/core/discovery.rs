//! Repository discovery

use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::Repo;
use crate::utils::{exists, is_repo_root, AccessError};

/// Listing-level failures; any of these aborts the whole command
#[derive(Debug, Error)]
pub enum FindError {
    #[error("failed to access root path: {0}")]
    RootNotAccessible(#[from] AccessError),
    #[error("no git repos found in root path {}", path.display())]
    NoRepositoriesFound { path: PathBuf },
    #[error("failed to walk directory tree under {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

/// Finds git repositories inside a given root path
///
/// Repositories nested inside other repositories are not returned: once a
/// directory is recognized as a repository root the walk doesn't descend
/// into it. Directories that can't be read because of permissions are
/// skipped. The returned handles are not sorted.
pub fn find(root: impl AsRef<Path>) -> Result<Vec<Repo>, FindError> {
    let mut finder = RepoFinder::new(root.as_ref())?;
    finder.walk()?;
    finder.finish()
}

/// Walk state for a single [`find`] call
struct RepoFinder {
    root: PathBuf,
    repos: Vec<Repo>,
}

impl RepoFinder {
    fn new(root: &Path) -> Result<Self, AccessError> {
        exists(root)?;
        // The root has to be listable, not just present
        fs::read_dir(root).map_err(|source| AccessError::NoAccess {
            path: root.to_path_buf(),
            source,
        })?;

        let root = std::path::absolute(root).map_err(|source| AccessError::NoAccess {
            path: root.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root,
            repos: Vec::new(),
        })
    }

    fn walk(&mut self) -> Result<(), FindError> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| {
                // Never descend below a repository root (this also skips .git itself)
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !is_dir || entry.depth() == 0 || !entry.path().parent().is_some_and(is_repo_root)
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) if is_permission_denied(&err) => {
                    log::warn!("skipping unreadable path: {err}");
                    continue;
                }
                Err(source) => {
                    return Err(FindError::Walk {
                        path: self.root.clone(),
                        source,
                    })
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            if is_repo_root(entry.path()) {
                self.add_if_ok(entry.path());
            }
        }

        Ok(())
    }

    /// Adds the found repo if it can be opened
    fn add_if_ok(&mut self, path: &Path) {
        match Repo::open(path) {
            Ok(repo) => {
                log::debug!("found repository {}", path.display());
                self.repos.push(repo);
            }
            Err(e) => log::debug!("ignoring repository candidate: {e}"),
        }
    }

    fn finish(self) -> Result<Vec<Repo>, FindError> {
        if self.repos.is_empty() {
            return Err(FindError::NoRepositoriesFound { path: self.root });
        }
        Ok(self.repos)
    }
}

fn is_permission_denied(err: &ignore::Error) -> bool {
    err.io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
}
