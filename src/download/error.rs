//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while downloading PDFs.
///
/// Any variant aborts the whole download pass; there is no per-file
/// skip-and-continue here. Per-file tolerance belongs to conversion.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Fetching a page or a PDF body failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// File system error (directory creation, listing, write, rename).
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
