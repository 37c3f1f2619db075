//! File system utilities

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the git metadata directory (or file, for worktrees and submodules)
pub const DOT_GIT: &str = ".git";

/// Why a path can't be used
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("can't access {}: directory doesn't exist", path.display())]
    NotFound { path: PathBuf },
    #[error("can't access {}: {source}", path.display())]
    NoAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns true if a path exists and can be accessed
///
/// A missing path is reported as [`AccessError::NotFound`], any other failure
/// (permissions, broken mounts) as [`AccessError::NoAccess`].
pub fn exists(path: &Path) -> Result<bool, AccessError> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AccessError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(AccessError::NoAccess {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Expands a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]));
            }
        }
    }
    PathBuf::from(path)
}

/// Checks if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .map_while(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// Returns true if the directory directly contains git metadata
pub fn is_repo_root(dir: &Path) -> bool {
    let marker = dir.join(DOT_GIT);
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => is_git_file(&marker),
        _ => false,
    }
}
