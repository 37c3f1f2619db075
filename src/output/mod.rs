//! Printers turning loaded statuses into text
//!
//! - `tree`: smart folded tree, see [`crate::tree::render`]
//! - `flat`: one line per repository with its full path
//! - `dump`: remote URL and current branch, for recreating the layout elsewhere

mod dump;
mod flat;
mod style;

pub use style::{branch_line, current_line, repo_status, Style};

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::core::ERRORS_HEADER;
use crate::git::Status;
use crate::tree::{self, Tree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Flat,
    Dump,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Flat => "flat",
            OutputFormat::Dump => "dump",
        };
        f.write_str(name)
    }
}

impl OutputFormat {
    /// Renders statuses of repositories found under `root`
    ///
    /// `statuses` is expected to be sorted by path. Tree and flat output end
    /// with a summary of per-repository errors, if there were any.
    pub fn render(&self, root: &Path, statuses: &[Status], style: &Style) -> String {
        match self {
            OutputFormat::Tree => {
                let tree = Tree::build(root, statuses.iter().cloned());
                with_error_summary(tree::render(&tree, style), statuses)
            }
            OutputFormat::Flat => with_error_summary(flat::render(statuses, style), statuses),
            OutputFormat::Dump => dump::render(statuses),
        }
    }
}

fn with_error_summary(mut out: String, statuses: &[Status]) -> String {
    if let Some(summary) = error_summary(statuses) {
        out.push_str("\n\n");
        out.push_str(&summary);
    }
    out
}

/// Every collected error as `path: message`, `None` if there were none
pub fn error_summary(statuses: &[Status]) -> Option<String> {
    let lines: Vec<String> = statuses
        .iter()
        .flat_map(|status| {
            status
                .errors
                .iter()
                .map(move |error| format!("{}: {error}", status.path.display()))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }
    Some(format!("{ERRORS_HEADER}\n{}", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(path: &str, remote: &str, errors: &[&str]) -> Status {
        let mut status = Status::new(path);
        status.current = "main".to_string();
        status.branches.insert("main".to_string(), String::new());
        status.remote = remote.to_string();
        status.errors = errors.iter().map(|e| e.to_string()).collect();
        status
    }

    #[test]
    fn test_error_summary_none_without_errors() {
        assert_eq!(error_summary(&[status("/r/a", "", &[])]), None);
    }

    #[test]
    fn test_error_summary_lists_every_error() {
        let statuses = [
            status("/r/a", "", &["fetch failed: timeout", "remote failed: boom"]),
            status("/r/b", "", &[]),
            status("/r/c", "", &["branches failed: bad"]),
        ];

        assert_eq!(
            error_summary(&statuses).unwrap(),
            "Oops, errors happened when loading repository status:\n\
             /r/a: fetch failed: timeout\n\
             /r/a: remote failed: boom\n\
             /r/c: branches failed: bad"
        );
    }

    #[test]
    fn test_tree_output_appends_error_summary() {
        let statuses = [
            status("/r/a", "", &["remote failed: boom"]),
            status("/r/b", "", &[]),
        ];

        let out = OutputFormat::Tree.render(Path::new("/r"), &statuses, &Style::PLAIN);

        assert_eq!(
            out,
            "/r/\na error\nb main ok\n\n\
             Oops, errors happened when loading repository status:\n\
             /r/a: remote failed: boom"
        );
    }

    #[test]
    fn test_dump_output_never_has_error_summary() {
        let statuses = [status("/r/a", "https://example.com/a.git", &["remote failed: boom"])];

        let out = OutputFormat::Dump.render(Path::new("/r"), &statuses, &Style::PLAIN);

        assert_eq!(out, "https://example.com/a.git main");
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::default(), OutputFormat::Tree);
        assert_eq!(OutputFormat::Flat.to_string(), "flat");
        assert_eq!(
            OutputFormat::from_str("dump", true).unwrap(),
            OutputFormat::Dump
        );
    }
}
