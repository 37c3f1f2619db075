//! Configuration constants and settings

// Concurrency Configuration
//
// Status loading is I/O-bound: every worker spends its time waiting on git
// subprocesses. The cap bounds concurrent processes and file descriptors when
// a root holds thousands of repositories.
pub const MAX_WORKERS: usize = 100;

// Timeout for a single git invocation
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 180;

// Settings defaults
pub const DEFAULT_REPOS_ROOT: &str = "~/repositories";
pub const CONFIG_DIR_NAME: &str = "reposcan";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Environment variables
pub const ENV_ROOT: &str = "REPOSCAN_ROOT";
pub const ENV_FETCH: &str = "REPOSCAN_FETCH";
pub const ENV_OUTPUT: &str = "REPOSCAN_OUT";
pub const ENV_JOBS: &str = "REPOSCAN_JOBS";

// UI Constants
pub const ERRORS_HEADER: &str = "Oops, errors happened when loading repository status:";
pub const ERROR_MARKER: &str = "error";
pub const LOADING_MESSAGE: &str = "loading status";
pub const PROGRESS_TEMPLATE: &str = "{spinner} {msg} {pos}/{len}";

// Tree rendering
pub const TREE_INDENT: &str = "    ";

/// Clamps a requested worker count to `1..=MAX_WORKERS` and to the amount of work
pub fn worker_count(requested: Option<usize>, repos: usize) -> usize {
    requested
        .unwrap_or(MAX_WORKERS)
        .clamp(1, MAX_WORKERS)
        .min(repos.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_defaults_to_cap() {
        assert_eq!(worker_count(None, 5_000), MAX_WORKERS);
    }

    #[test]
    fn test_worker_count_never_exceeds_repo_count() {
        assert_eq!(worker_count(None, 3), 3);
        assert_eq!(worker_count(Some(50), 10), 10);
    }

    #[test]
    fn test_worker_count_clamps_requested_value() {
        assert_eq!(worker_count(Some(0), 10), 1);
        assert_eq!(worker_count(Some(1_000), 5_000), MAX_WORKERS);
        assert_eq!(worker_count(Some(4), 0), 1);
    }
}
