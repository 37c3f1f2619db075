//! Low-level git command execution

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

/// The repository query a git invocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOp {
    Fetch,
    CurrentBranch,
    Branches,
    Upstream,
    AheadBehind,
    Status,
    Remote,
    Description,
}

impl fmt::Display for GitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GitOp::Fetch => "fetch",
            GitOp::CurrentBranch => "current branch",
            GitOp::Branches => "branches",
            GitOp::Upstream => "upstream",
            GitOp::AheadBehind => "ahead/behind",
            GitOp::Status => "worktree status",
            GitOp::Remote => "remote",
            GitOp::Description => "branch description",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by git invocations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("{op} failed: git {args} on {}: {stderr}", path.display())]
    Failed {
        op: GitOp,
        path: PathBuf,
        args: String,
        stderr: String,
    },
    #[error("{op} failed: could not run git {args}: {source}")]
    Spawn {
        op: GitOp,
        args: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{op} failed: git {args} timed out after {secs} seconds")]
    Timeout { op: GitOp, args: String, secs: u64 },
    #[error("{op} failed: unexpected output from git {args}: {output:?}")]
    Parse {
        op: GitOp,
        args: String,
        output: String,
    },
}

/// Captured result of a finished git process
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Splits command output into lines. Empty output yields no lines.
pub fn lines(output: &str) -> Vec<&str> {
    let trimmed = output.trim_end_matches('\n');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().collect()
}

/// Runs a git command in the specified directory with a timeout
///
/// A non-zero exit is not an error here; callers decide what a failing exit
/// status means for their query. Use [`capture`] for the common case.
pub async fn run_git(path: &Path, op: GitOp, args: &[&str]) -> Result<GitOutput, GitError> {
    let timeout_duration = Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS);
    log::debug!("git {} (in {})", args.join(" "), path.display());

    let result = tokio::time::timeout(
        timeout_duration,
        Command::new("git")
            .args(args)
            .current_dir(path)
            .kill_on_drop(true)
            .output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        Ok(Err(source)) => Err(GitError::Spawn {
            op,
            args: args.join(" "),
            source,
        }),
        Err(_) => Err(GitError::Timeout {
            op,
            args: args.join(" "),
            secs: GIT_OPERATION_TIMEOUT_SECS,
        }),
    }
}

/// Runs a git command and returns its stdout, mapping a non-zero exit to [`GitError::Failed`]
pub async fn capture(path: &Path, op: GitOp, args: &[&str]) -> Result<String, GitError> {
    let output = run_git(path, op, args).await?;
    if output.success {
        Ok(output.stdout)
    } else {
        Err(failed(path, op, args, output.stderr))
    }
}

pub(crate) fn failed(path: &Path, op: GitOp, args: &[&str], stderr: String) -> GitError {
    GitError::Failed {
        op,
        path: path.to_path_buf(),
        args: args.join(" "),
        stderr,
    }
}

pub(crate) fn parse_error(op: GitOp, args: &[&str], output: &str) -> GitError {
    GitError::Parse {
        op,
        args: args.join(" "),
        output: output.to_string(),
    }
}
