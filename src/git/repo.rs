//! Repository handle and the git queries the status loader relies on

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::command::{capture, failed, lines, parse_error, run_git, GitError, GitOp};
use crate::utils::{exists, AccessError};

// Git command arguments
const GIT_FETCH_ARGS: &[&str] = &["fetch", "--all", "--quiet"];
const GIT_SYMBOLIC_REF_ARGS: &[&str] = &["symbolic-ref", "--short", "-q", "HEAD"];
const GIT_BRANCH_ARGS: &[&str] = &["branch", "--format=%(refname:short)"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--ignore-submodules", "--porcelain"];
const GIT_REMOTE_URLS_ARGS: &[&str] = &["config", "--get-regexp", r"^remote\..*\.url$"];

/// Untracked files are marked with this prefix in porcelain status output
const UNTRACKED_PREFIX: &str = "??";

/// Exit code git uses for "nothing found" in `config --get` and `symbolic-ref -q`
const GIT_NOT_FOUND_EXIT_CODE: i32 = 1;

/// Read-only queries against a single repository
///
/// Every method issues at most one git invocation. The status loader is
/// generic over this trait so alternative backends can be plugged in.
#[async_trait]
pub trait GitRepository: Send + Sync {
    /// Path to the working-copy root
    fn path(&self) -> &Path;

    /// Fetches from all remotes
    async fn fetch(&self) -> Result<(), GitError>;

    /// Short name of the checked-out branch, `None` when HEAD is detached
    async fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// Local branch names
    async fn branches(&self) -> Result<Vec<String>, GitError>;

    /// Upstream of a branch, `None` when it doesn't track one
    async fn upstream(&self, branch: &str) -> Result<Option<String>, GitError>;

    /// Commits only on `branch` and commits only on `upstream`
    async fn ahead_behind(&self, branch: &str, upstream: &str) -> Result<(u32, u32), GitError>;

    /// Number of tracked files with staged or unstaged modifications
    async fn uncommitted(&self) -> Result<usize, GitError>;

    /// Number of untracked files
    async fn untracked(&self) -> Result<usize, GitError>;

    /// URL of the first configured remote
    async fn remote(&self) -> Result<Option<String>, GitError>;

    /// Lines of the user-set `branch.<name>.description`
    async fn description(&self, branch: &str) -> Result<Vec<String>, GitError>;
}

/// A git repository on disk, queried by running the `git` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    path: PathBuf,
}

impl Repo {
    /// Checks that the path can be accessed and returns a handle pointing to it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AccessError> {
        let path = path.into();
        exists(&path)?;
        Ok(Self { path })
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    async fn porcelain_status(&self) -> Result<String, GitError> {
        capture(&self.path, GitOp::Status, GIT_STATUS_PORCELAIN_ARGS).await
    }

    /// Like [`capture`], but treats the "not found" exit code as an empty result
    async fn capture_optional(&self, op: GitOp, args: &[&str]) -> Result<Option<String>, GitError> {
        let output = run_git(&self.path, op, args).await?;
        if output.success {
            return Ok(Some(output.stdout));
        }
        if output.code == Some(GIT_NOT_FOUND_EXIT_CODE) && output.stderr.is_empty() {
            return Ok(None);
        }
        Err(failed(&self.path, op, args, output.stderr))
    }
}

#[async_trait]
impl GitRepository for Repo {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn fetch(&self) -> Result<(), GitError> {
        capture(&self.path, GitOp::Fetch, GIT_FETCH_ARGS).await.map(|_| ())
    }

    async fn current_branch(&self) -> Result<Option<String>, GitError> {
        let output = self
            .capture_optional(GitOp::CurrentBranch, GIT_SYMBOLIC_REF_ARGS)
            .await?;
        Ok(output.map(|out| out.trim().to_string()).filter(|b| !b.is_empty()))
    }

    async fn branches(&self) -> Result<Vec<String>, GitError> {
        let output = capture(&self.path, GitOp::Branches, GIT_BRANCH_ARGS).await?;
        Ok(parse_branches(&output))
    }

    async fn upstream(&self, branch: &str) -> Result<Option<String>, GitError> {
        let refname = format!("refs/heads/{branch}");
        let args = ["for-each-ref", "--format=%(upstream:short)", refname.as_str()];
        let output = capture(&self.path, GitOp::Upstream, &args).await?;
        let upstream = output.trim();
        Ok((!upstream.is_empty()).then(|| upstream.to_string()))
    }

    async fn ahead_behind(&self, branch: &str, upstream: &str) -> Result<(u32, u32), GitError> {
        let range = format!("{branch}...{upstream}");
        let args = ["rev-list", "--left-right", "--count", range.as_str(), "--"];
        let output = capture(&self.path, GitOp::AheadBehind, &args).await?;
        parse_ahead_behind(&output).ok_or_else(|| parse_error(GitOp::AheadBehind, &args, &output))
    }

    async fn uncommitted(&self) -> Result<usize, GitError> {
        let output = self.porcelain_status().await?;
        Ok(count_uncommitted(&output))
    }

    async fn untracked(&self) -> Result<usize, GitError> {
        let output = self.porcelain_status().await?;
        Ok(count_untracked(&output))
    }

    async fn remote(&self) -> Result<Option<String>, GitError> {
        let output = self
            .capture_optional(GitOp::Remote, GIT_REMOTE_URLS_ARGS)
            .await?;
        Ok(output.as_deref().and_then(parse_first_remote_url))
    }

    async fn description(&self, branch: &str) -> Result<Vec<String>, GitError> {
        let key = format!("branch.{branch}.description");
        let args = ["config", "--get", key.as_str()];
        let output = self.capture_optional(GitOp::Description, &args).await?;
        Ok(output
            .as_deref()
            .map(|out| lines(out).into_iter().map(str::to_string).collect())
            .unwrap_or_default())
    }
}

fn parse_branches(output: &str) -> Vec<String> {
    lines(output)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("HEAD detached"))
        .map(str::to_string)
        .collect()
}

/// Parses `rev-list --left-right --count` output: two tab-separated integers
fn parse_ahead_behind(output: &str) -> Option<(u32, u32)> {
    let line = lines(output).into_iter().next()?;
    let (ahead, behind) = line.split_once('\t')?;
    Some((ahead.trim().parse().ok()?, behind.trim().parse().ok()?))
}

fn count_uncommitted(output: &str) -> usize {
    lines(output)
        .into_iter()
        .filter(|line| !line.starts_with(UNTRACKED_PREFIX) && !line.trim().is_empty())
        .count()
}

fn count_untracked(output: &str) -> usize {
    lines(output)
        .into_iter()
        .filter(|line| line.starts_with(UNTRACKED_PREFIX))
        .count()
}

/// Picks the URL from the first `remote.<name>.url <url>` line
fn parse_first_remote_url(output: &str) -> Option<String> {
    lines(output)
        .into_iter()
        .find_map(|line| line.split_once(' '))
        .map(|(_, url)| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
