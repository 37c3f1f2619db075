//! Status formatting shared by the printers

use colored::{Color, Colorize};

use crate::core::ERROR_MARKER;
use crate::git::{Status, STATUS_OK};

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Wrap status parts in ANSI colors
    pub color: bool,
}

impl Style {
    pub const PLAIN: Style = Style { color: false };
    pub const COLORED: Style = Style { color: true };

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color && !text.is_empty() {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn branch(&self, name: &str) -> String {
        self.paint(name, Color::Blue)
    }

    pub fn ok(&self) -> String {
        self.paint(STATUS_OK, Color::Green)
    }

    pub fn branch_status(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    pub fn worktree(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    pub fn error(&self) -> String {
        self.paint(ERROR_MARKER, Color::Red)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::COLORED
    }
}

/// Current branch followed by its status and the worktree state
///
/// `ok` is only shown for a known local branch that is in sync with its
/// upstream and has a clean worktree.
pub fn current_line(status: &Status, style: &Style) -> String {
    let worktree = if status.worktree.is_empty() {
        String::new()
    } else {
        format!("[ {} ]", status.worktree)
    };

    let mut parts = vec![style.branch(&status.current)];
    match status.branch_status(&status.current) {
        Some("") if worktree.is_empty() => parts.push(style.ok()),
        Some(text) if !text.is_empty() => parts.push(style.branch_status(text)),
        _ => {}
    }
    if !worktree.is_empty() {
        parts.push(style.worktree(&worktree));
    }
    parts.join(" ")
}

/// A non-current branch with its status, `ok` when in sync
pub fn branch_line(name: &str, text: &str, style: &Style) -> String {
    let text = if text.is_empty() {
        style.ok()
    } else {
        style.branch_status(text)
    };
    format!("{} {text}", style.branch(name))
}

/// Leaf status text; other branches go on their own lines prefixed with `indent`
pub fn repo_status(status: &Status, indent: &str, style: &Style) -> String {
    if status.has_errors() {
        return style.error();
    }

    let mut text = current_line(status, style);
    for name in status.other_branches() {
        let branch_text = status.branch_status(name).unwrap_or_default();
        text.push('\n');
        text.push_str(indent);
        text.push_str(&branch_line(name, branch_text, style));
    }
    text
}
