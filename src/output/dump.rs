use crate::git::Status;

/// Renders `URL branch` lines for repositories with a remote
///
/// The branch is left out when HEAD is detached or unknown.
pub(super) fn render(statuses: &[Status]) -> String {
    statuses
        .iter()
        .filter(|status| !status.remote.is_empty())
        .map(|status| {
            if status.is_on_branch() {
                format!("{} {}", status.remote, status.current)
            } else {
                status.remote.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
