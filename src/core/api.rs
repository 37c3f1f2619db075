//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery
//! - Concurrent status loading
//! - Settings resolution
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{find, FindError};

// Status loading
pub use super::loader::StatusLoader;
pub use super::progress::create_loading_progress_bar;

// Settings
pub use super::settings::{FileConfig, Settings, SettingsError, SettingsOverrides};

// Configuration
pub use super::config::{worker_count, GIT_OPERATION_TIMEOUT_SECS, MAX_WORKERS};
pub use super::config::{ENV_FETCH, ENV_JOBS, ENV_OUTPUT, ENV_ROOT};

// User-facing messages
pub use super::config::{ERRORS_HEADER, ERROR_MARKER};

// Internal helpers for rendering modules
pub(crate) use super::config::TREE_INDENT;
