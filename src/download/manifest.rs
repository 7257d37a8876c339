//! JSON manifest written alongside downloaded files.
//!
//! The manifest records the stable index/URL/filename assignment, for
//! people and scripts inspecting the directory later. It is informational
//! only: the skip logic keys on file presence, never on this file.
//!
//! Only the assignment is recorded, never per-run outcomes, so a rerun
//! that discovers the same links rewrites the manifest with identical
//! bytes and the directory contents stay byte-identical.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::DownloadRecord;

/// Filename of the manifest inside a download directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Errors produced writing the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// I/O error writing the manifest file to disk.
    #[error("I/O error writing manifest: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error (shouldn't occur for well-formed structs).
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One manifest row.
#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    index: usize,
    url: &'a str,
    filename: &'a str,
}

/// Serializes `records` to `dir/manifest.json`, replacing any previous
/// manifest.
///
/// # Errors
///
/// Returns [`ManifestError`] on serialization or write failure. Callers
/// treat this as non-fatal; the downloaded files are the real output.
pub async fn write(dir: &Path, records: &[DownloadRecord]) -> Result<(), ManifestError> {
    let entries: Vec<ManifestEntry<'_>> = records
        .iter()
        .map(|record| ManifestEntry {
            index: record.index,
            url: record.url.as_str(),
            filename: &record.filename,
        })
        .collect();

    let json = serde_json::to_vec_pretty(&entries)?;
    let path = dir.join(MANIFEST_FILENAME);
    tokio::fs::write(&path, json).await?;
    debug!(path = %path.display(), entries = entries.len(), "manifest written");
    Ok(())
}
