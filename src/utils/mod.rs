pub(crate) mod fs;

// Public API - utilities used by the finder and commands
pub use fs::{exists, expand_tilde, is_repo_root, AccessError, DOT_GIT};
