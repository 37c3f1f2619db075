//! Public API for git operations.
//!
//! This module provides the stable public API for git-related functionality:
//! - Running git and mapping failures to typed errors
//! - The repository handle and its read-only queries
//! - Status snapshots and their loading
//!
//! ## Example: Loading a single status
//!
//! ```rust,no_run
//! use reposcan::git::{load_status, Repo};
//!
//! async fn check(path: &str) {
//!     let repo = Repo::open(path).expect("path should exist");
//!     let status = load_status(&repo, false).await;
//!     println!("{} is on {}", status.path.display(), status.current);
//! }
//! ```

// Command execution
pub use super::command::{run_git, GitError, GitOp, GitOutput};

// Repository handle
pub use super::repo::{GitRepository, Repo};

// Status
pub use super::status::{load_status, worktree_summary, BranchStatus, Status};
pub use super::status::{
    STATUS_AHEAD, STATUS_BEHIND, STATUS_DETACHED, STATUS_NO_UPSTREAM, STATUS_OK,
    STATUS_UNCOMMITTED, STATUS_UNKNOWN, STATUS_UNTRACKED,
};
