//! End-to-end pipeline: traverse pages, download PDFs, re-encode them.
//!
//! Stages run strictly in sequence. Traversal and download failures are
//! fatal for the run; conversion failures are per-file and show up in the
//! report instead.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::{CrawlConfig, IMAGE_SUBDIR};
use crate::convert::{self, ConversionOutcome, ConversionRecord, ConvertError, ConvertSettings};
use crate::download::{self, DownloadError, DownloadOutcome, DownloadRecord};
use crate::fetch::{FetchError, HttpClient};
use crate::traverse;

/// Errors that abort the whole pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Page traversal failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The download pass failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The conversion pass failed at the directory level.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Full account of one pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Where the downloaded PDFs live.
    pub download_dir: PathBuf,
    /// How many pages were scanned for PDF links.
    pub pages_scanned: usize,
    /// Per-URL download records, in sequence-index order.
    pub downloads: Vec<DownloadRecord>,
    /// Per-file conversion records; empty when conversion was disabled.
    pub conversions: Vec<ConversionRecord>,
}

impl PipelineReport {
    /// Number of PDFs fetched during this run.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloads
            .iter()
            .filter(|r| matches!(r.outcome, DownloadOutcome::Downloaded { .. }))
            .count()
    }

    /// Number of PDFs already present and skipped.
    #[must_use]
    pub fn download_skipped(&self) -> usize {
        self.downloads.len() - self.downloaded()
    }

    /// Number of PDFs successfully re-encoded.
    #[must_use]
    pub fn converted(&self) -> usize {
        self.conversions
            .iter()
            .filter(|r| matches!(r.outcome, ConversionOutcome::Converted { .. }))
            .count()
    }

    /// Conversion records that failed, for end-of-run reporting.
    #[must_use]
    pub fn conversion_failures(&self) -> Vec<&ConversionRecord> {
        self.conversions
            .iter()
            .filter(|r| matches!(r.outcome, ConversionOutcome::Failed { .. }))
            .collect()
    }
}

/// Runs the whole pipeline for one crawl.
///
/// `output_root` is the root download directory; the config's optional
/// subdirectory nests under it, and converted output lands in an `image/`
/// subdirectory of the download directory. `convert_settings == None`
/// disables the conversion pass.
///
/// # Errors
///
/// Returns [`PipelineError`] on the first fatal failure; see the error
/// type for which failures are fatal.
pub async fn run(
    client: &HttpClient,
    config: &CrawlConfig,
    output_root: &Path,
    name_prefix: &str,
    convert_settings: Option<ConvertSettings>,
) -> Result<PipelineReport, PipelineError> {
    let pages = traverse::resolve_pages(
        client,
        &config.start_url,
        config.week_pattern.as_ref(),
        config.lecture_pattern.as_ref(),
    )
    .await?;
    info!(pages = pages.len(), "page set resolved");

    let download_dir = config.download_dir(output_root);
    let downloads = download::run(client, &pages, &download_dir, name_prefix).await?;

    let conversions = if let Some(settings) = convert_settings {
        let image_dir = download_dir.join(IMAGE_SUBDIR);
        convert::run(&download_dir, &image_dir, settings).await?
    } else {
        Vec::new()
    };

    Ok(PipelineReport {
        download_dir,
        pages_scanned: pages.len(),
        downloads,
        conversions,
    })
}
