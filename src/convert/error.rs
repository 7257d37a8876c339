//! Error types for the conversion module.
//!
//! Two tiers: [`ConvertError`] aborts the batch (directory-level
//! filesystem problems), [`ConvertFailure`] is recorded against one file
//! and the batch continues.

use std::path::PathBuf;

use thiserror::Error;

/// Batch-fatal conversion errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// File system error on the source or output directory.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Per-file conversion failures. Recorded, never batch-fatal.
#[derive(Debug, Error)]
pub enum ConvertFailure {
    /// The PDF could not be opened or parsed.
    #[error("cannot open PDF: {detail}")]
    Open {
        /// Library error detail.
        detail: String,
    },

    /// One page failed to rasterize.
    #[error("cannot render page {page}: {detail}")]
    Render {
        /// 1-based page number.
        page: usize,
        /// Library error detail.
        detail: String,
    },

    /// One page raster failed to re-encode as JPEG.
    #[error("cannot encode page {page}: {source}")]
    Encode {
        /// 1-based page number.
        page: usize,
        /// The underlying image encoding error.
        #[source]
        source: image::ImageError,
    },

    /// The output document could not be assembled or serialized.
    #[error("cannot assemble output PDF: {detail}")]
    Assemble {
        /// Library error detail.
        detail: String,
    },

    /// File system error reading the source or writing the output file.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The blocking conversion task panicked.
    #[error("conversion task panicked: {detail}")]
    TaskPanic {
        /// Join error detail.
        detail: String,
    },
}

impl ConvertFailure {
    /// Creates an IO failure for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
