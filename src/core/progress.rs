//! Progress reporting while repository statuses are loaded

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use super::config::{LOADING_MESSAGE, PROGRESS_TEMPLATE};

const TICK_INTERVAL_MS: u64 = 100;

/// Creates the loading progress bar, drawn on stderr so stdout stays clean
///
/// indicatif hides the bar automatically when stderr is not a terminal.
pub fn create_loading_progress_bar(total_repos: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::with_draw_target(Some(total_repos as u64), ProgressDrawTarget::stderr());
    pb.set_style(create_progress_style()?);
    pb.set_message(LOADING_MESSAGE);
    pb.enable_steady_tick(Duration::from_millis(TICK_INTERVAL_MS));
    Ok(pb)
}

/// Creates a progress bar style configuration
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner().template(PROGRESS_TEMPLATE)?)
}
