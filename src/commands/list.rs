//! Repository listing command implementation
//!
//! Finds every repository under the root, loads their statuses concurrently
//! and prints them in the selected output format.

use anyhow::{Context, Result};

use crate::core::{create_loading_progress_bar, find, Settings, StatusLoader};
use crate::output::Style;

/// Produces the listing text for the given settings
///
/// Fails only when the root can't be scanned or holds no repositories;
/// problems with individual repositories are part of the output.
pub async fn list(settings: &Settings, style: &Style) -> Result<String> {
    let root = std::path::absolute(&settings.root)
        .with_context(|| format!("invalid root path {}", settings.root.display()))?;

    let repos = find(&root)?;
    log::debug!("found {} repositories under {}", repos.len(), root.display());

    let progress = create_loading_progress_bar(repos.len())?;
    let statuses = StatusLoader::new(settings.jobs)
        .with_progress(progress)
        .load_all(repos, settings.fetch)
        .await;

    Ok(settings.output.render(&root, &statuses, style))
}

/// Handles the list command
pub async fn handle_list_command(settings: Settings, style: Style) -> Result<()> {
    let output = list(&settings, &style).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
