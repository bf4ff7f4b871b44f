//! Intermediate snapshot persistence between the fetch and summarize stages.
//!
//! The snapshot is a pretty-printed UTF-8 JSON file at a well-known path
//! (default `temp/raw_news.json`). The fetch stage overwrites it wholesale
//! on every run; the summarize stage reads it once and fails loudly when it
//! is absent or corrupt, since that means the fetch stage never ran or
//! failed systemically.

use crate::models::{Article, Snapshot};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Build a [`Snapshot`] from the deduplicated articles and write it to
/// `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_snapshot(
    path: impl AsRef<Path>,
    articles: Vec<Article>,
) -> Result<Snapshot, Box<dyn Error>> {
    let path = path.as_ref();
    let snapshot = Snapshot::new(articles);
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(path, json).await?;
    info!(total = snapshot.total, "Wrote news snapshot");
    Ok(snapshot)
}

/// Read the snapshot back for the summarize stage.
///
/// # Errors
///
/// Fails when the file is missing or does not parse as a [`Snapshot`].
/// This stage has no fallback.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn read_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, Box<dyn Error>> {
    let contents = fs::read_to_string(path.as_ref()).await?;
    let snapshot: Snapshot = serde_json::from_str(&contents)?;
    info!(total = snapshot.total, timestamp = %snapshot.timestamp, "Loaded news snapshot");
    Ok(snapshot)
}
