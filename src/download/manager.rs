use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use tracing::{debug, info, warn};
use url::Url;

use crate::collect::extract_hrefs;
use crate::fetch::HttpClient;

use super::DownloadError;
use super::manifest;

/// What happened to one discovered PDF URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was fetched and written to disk.
    Downloaded {
        /// Size of the written file in bytes.
        bytes: u64,
    },
    /// The filename was already present; no body fetch happened.
    Skipped,
}

/// One discovered PDF URL with its assigned index and filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    /// Run-global sequence index, starting at 1.
    pub index: usize,
    /// The resolved PDF URL.
    pub url: Url,
    /// Destination filename, `{prefix}{index}_{last path segment}`.
    pub filename: String,
    /// Whether the file was fetched or found already present.
    pub outcome: DownloadOutcome,
}

/// Scans `pages` for PDF links and downloads each distinct URL once.
///
/// Pages are visited in the lexicographic order of the [`BTreeSet`];
/// within a page, anchors are visited in document order. Every distinct
/// PDF URL advances the sequence index, whether its file is fetched or
/// already present, so numbering is identical across reruns.
///
/// A JSON manifest of the index/URL/filename assignment is written into
/// `dest_dir` after the pass; manifest write failure is logged, not
/// fatal. The manifest carries no per-run state, so an idempotent rerun
/// rewrites it with identical bytes.
///
/// # Errors
///
/// Returns [`DownloadError`] on the first failed fetch or filesystem
/// operation; nothing after the failure point is attempted.
pub async fn run(
    client: &HttpClient,
    pages: &BTreeSet<Url>,
    dest_dir: &Path,
    name_prefix: &str,
) -> Result<Vec<DownloadRecord>, DownloadError> {
    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| DownloadError::io(dest_dir, e))?;

    let skip_set = existing_pdf_names(dest_dir).await?;
    debug!(existing = skip_set.len(), "skip-set loaded");

    let mut seen: HashSet<Url> = HashSet::new();
    let mut records: Vec<DownloadRecord> = Vec::new();

    for page in pages {
        info!(page = %page, "scanning page for PDF links");
        let markup = client.fetch_text(page).await?;

        for href in extract_hrefs(&markup) {
            if !href.to_ascii_lowercase().ends_with(".pdf") {
                continue;
            }
            let Ok(pdf_url) = page.join(&href) else {
                debug!(href = %href, "ignoring unresolvable href");
                continue;
            };
            if !seen.insert(pdf_url.clone()) {
                continue;
            }

            let index = records.len() + 1;
            let filename = format!("{name_prefix}{index}_{}", last_path_segment(&pdf_url));

            let outcome = if skip_set.contains(&filename) {
                debug!(filename = %filename, "already present, skipping");
                DownloadOutcome::Skipped
            } else {
                let bytes = fetch_to_file(client, &pdf_url, dest_dir, &filename).await?;
                info!(filename = %filename, bytes, "downloaded");
                DownloadOutcome::Downloaded { bytes }
            };

            records.push(DownloadRecord {
                index,
                url: pdf_url,
                filename,
                outcome,
            });
        }
    }

    if let Err(error) = manifest::write(dest_dir, &records).await {
        warn!(error = %error, "manifest write failed, continuing");
    }

    let downloaded = records
        .iter()
        .filter(|r| matches!(r.outcome, DownloadOutcome::Downloaded { .. }))
        .count();
    info!(
        total = records.len(),
        downloaded,
        skipped = records.len() - downloaded,
        "download pass complete"
    );
    Ok(records)
}

/// Lists the `.pdf` filenames (case-insensitive extension) in `dir`.
async fn existing_pdf_names(dir: &Path) -> Result<HashSet<String>, DownloadError> {
    let mut names = HashSet::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| DownloadError::io(dir, e))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DownloadError::io(dir, e))?
    {
        if let Ok(name) = entry.file_name().into_string() {
            if name.to_ascii_lowercase().ends_with(".pdf") {
                names.insert(name);
            }
        }
    }
    Ok(names)
}

/// Fetches `url` and writes the body atomically to `dir/filename`,
/// returning the byte count. The body goes to `filename.part` first and
/// is renamed into place only after a complete write.
async fn fetch_to_file(
    client: &HttpClient,
    url: &Url,
    dir: &Path,
    filename: &str,
) -> Result<u64, DownloadError> {
    let body = client.fetch_bytes(url).await?;

    let final_path = dir.join(filename);
    let part_path = dir.join(format!("{filename}.part"));

    if let Err(e) = tokio::fs::write(&part_path, &body).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(DownloadError::io(part_path, e));
    }
    tokio::fs::rename(&part_path, &final_path)
        .await
        .map_err(|e| DownloadError::io(&final_path, e))?;

    Ok(body.len() as u64)
}

/// Returns the text after the last `/` of the URL path.
fn last_path_segment(url: &Url) -> &str {
    let path = url.path();
    path.rsplit('/').next().unwrap_or(path)
}
