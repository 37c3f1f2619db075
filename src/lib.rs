//! # reposcan
//!
//! `reposcan` finds every git repository below a root directory and reports
//! the state of each of them: current branch, how far every local branch is
//! ahead of or behind its upstream, uncommitted and untracked files. It powers
//! the `reposcan` CLI tool.
//!
//! ## Core Features
//!
//! - **Discovery**: a single walk that stops at repository roots, so nested
//!   repositories are not reported.
//! - **Concurrent Loading**: statuses are gathered by a bounded pool of workers;
//!   a failing repository never stops the others.
//! - **Smart Tree Output**: single-child directory chains are folded into one
//!   line and branching directories are indented.
//!
//! ## Example
//!
//! ```rust,no_run
//! use reposcan::core::{find, StatusLoader};
//! use reposcan::output::{OutputFormat, Style};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let root = std::path::absolute("repositories")?;
//!     let repos = find(&root)?;
//!     let statuses = StatusLoader::new(None).load_all(repos, false).await;
//!     println!("{}", OutputFormat::Tree.render(&root, &statuses, &Style::PLAIN));
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod output;
pub mod tree;
pub mod utils;
