//! Repository status snapshot and its loading

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::repo::GitRepository;

// Status messages
pub const STATUS_UNKNOWN: &str = "unknown";
pub const STATUS_DETACHED: &str = "detached HEAD";
pub const STATUS_NO_UPSTREAM: &str = "no upstream";
pub const STATUS_AHEAD: &str = "ahead";
pub const STATUS_BEHIND: &str = "behind";
pub const STATUS_OK: &str = "ok";
pub const STATUS_UNCOMMITTED: &str = "uncommitted";
pub const STATUS_UNTRACKED: &str = "untracked";

/// Sync state of one local branch relative to its upstream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchStatus {
    pub name: String,
    /// Empty when the branch doesn't track anything
    pub upstream: String,
    pub ahead: u32,
    pub behind: u32,
}

impl BranchStatus {
    /// Human readable summary; empty when the branch is in sync with its upstream
    pub fn summary(&self) -> String {
        if self.upstream.is_empty() {
            return STATUS_NO_UPSTREAM.to_string();
        }

        let mut parts = Vec::new();
        if self.ahead != 0 {
            parts.push(format!("{} {STATUS_AHEAD}", self.ahead));
        }
        if self.behind != 0 {
            parts.push(format!("{} {STATUS_BEHIND}", self.behind));
        }
        parts.join(" ")
    }
}

/// Printable snapshot of a repository, created once per listing run
///
/// Errors hit while gathering any field are collected in `errors`; the
/// remaining fields hold whatever could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub path: PathBuf,
    /// Checked-out branch, [`STATUS_DETACHED`] or [`STATUS_UNKNOWN`]
    pub current: String,
    /// Branch name -> branch status summary
    pub branches: BTreeMap<String, String>,
    pub branch_descriptions: BTreeMap<String, Vec<String>>,
    pub worktree: String,
    pub remote: String,
    pub errors: Vec<String>,
}

impl Status {
    /// Creates an empty status with the current branch still unknown
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: STATUS_UNKNOWN.to_string(),
            branches: BTreeMap::new(),
            branch_descriptions: BTreeMap::new(),
            worktree: String::new(),
            remote: String::new(),
            errors: Vec::new(),
        }
    }

    /// Names of all branches except the checked-out one, sorted
    pub fn other_branches(&self) -> impl Iterator<Item = &str> {
        self.branches
            .keys()
            .map(String::as_str)
            .filter(move |name| *name != self.current)
    }

    /// Summary of a given branch, `None` if there is no such local branch
    pub fn branch_status(&self, branch: &str) -> Option<&str> {
        self.branches.get(branch).map(String::as_str)
    }

    pub fn branch_description(&self, branch: &str) -> &[String] {
        self.branch_descriptions
            .get(branch)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when HEAD points at a local branch tip
    pub fn is_on_branch(&self) -> bool {
        self.current != STATUS_DETACHED && self.current != STATUS_UNKNOWN
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Reads status of a repository
///
/// If `fetch` is true, it first fetches from all remotes. Every step is
/// attempted even when an earlier one failed; failures end up in
/// [`Status::errors`].
pub async fn load_status<R: GitRepository + ?Sized>(repo: &R, fetch: bool) -> Status {
    let mut status = Status::new(repo.path());

    if fetch {
        if let Err(e) = repo.fetch().await {
            status.errors.push(e.to_string());
        }
    }

    match repo.current_branch().await {
        Ok(Some(branch)) => status.current = branch,
        Ok(None) => status.current = STATUS_DETACHED.to_string(),
        Err(e) => status.errors.push(e.to_string()),
    }

    load_branches(repo, &mut status).await;

    match load_worktree(repo).await {
        Ok(worktree) => status.worktree = worktree,
        Err(e) => status.errors.push(e),
    }

    match repo.remote().await {
        Ok(remote) => status.remote = remote.unwrap_or_default(),
        Err(e) => status.errors.push(e.to_string()),
    }

    status
}

async fn load_branches<R: GitRepository + ?Sized>(repo: &R, status: &mut Status) {
    let branches = match repo.branches().await {
        Ok(branches) => branches,
        Err(e) => {
            status.errors.push(e.to_string());
            return;
        }
    };

    for branch in branches {
        match load_branch_status(repo, &branch).await {
            Ok(branch_status) => {
                status.branches.insert(branch.clone(), branch_status.summary());
            }
            Err(e) => {
                status.branches.insert(branch.clone(), String::new());
                status.errors.push(e);
            }
        }

        match repo.description(&branch).await {
            Ok(description) if !description.is_empty() => {
                status.branch_descriptions.insert(branch, description);
            }
            Ok(_) => {}
            Err(e) => status.errors.push(e.to_string()),
        }
    }
}

async fn load_branch_status<R: GitRepository + ?Sized>(
    repo: &R,
    branch: &str,
) -> Result<BranchStatus, String> {
    let upstream = repo
        .upstream(branch)
        .await
        .map_err(|e| e.to_string())?
        .unwrap_or_default();

    let mut branch_status = BranchStatus {
        name: branch.to_string(),
        upstream,
        ..Default::default()
    };

    if branch_status.upstream.is_empty() {
        return Ok(branch_status);
    }

    let (ahead, behind) = repo
        .ahead_behind(branch, &branch_status.upstream)
        .await
        .map_err(|e| e.to_string())?;
    branch_status.ahead = ahead;
    branch_status.behind = behind;

    Ok(branch_status)
}

async fn load_worktree<R: GitRepository + ?Sized>(repo: &R) -> Result<String, String> {
    let uncommitted = repo.uncommitted().await.map_err(|e| e.to_string())?;
    let untracked = repo.untracked().await.map_err(|e| e.to_string())?;
    Ok(worktree_summary(uncommitted, untracked))
}

/// "N uncommitted N untracked", empty when both are zero
pub fn worktree_summary(uncommitted: usize, untracked: usize) -> String {
    let mut parts = Vec::new();
    if uncommitted != 0 {
        parts.push(format!("{uncommitted} {STATUS_UNCOMMITTED}"));
    }
    if untracked != 0 {
        parts.push(format!("{untracked} {STATUS_UNTRACKED}"));
    }
    parts.join(" ")
}
