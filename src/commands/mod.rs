//! Command implementations

pub mod list;

pub use list::{handle_list_command, list};
