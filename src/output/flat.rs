use super::style::{repo_status, Style};
use crate::git::Status;

/// Renders one line per repository prefixed with its full path
pub(super) fn render(statuses: &[Status], style: &Style) -> String {
    statuses
        .iter()
        .map(|status| {
            let path = status.path.display().to_string();
            let indent = " ".repeat(path.chars().count() + 1);
            format!("{path} {}", repo_status(status, &indent, style))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
