//! Batch PDF re-encoder: rasterize image-only PDFs and rebuild them as
//! compressed, lossy-JPEG page PDFs.
//!
//! Scanned lecture material is often a huge PDF of full-resolution page
//! scans. This module trades that for a much smaller file: every page is
//! rendered to an RGB raster at a fixed DPI, re-encoded as JPEG, and the
//! JPEGs are assembled into one multi-page output PDF with the same page
//! count. The contract is "readable, smaller", not bit-exact.
//!
//! Unlike downloading, conversion is per-file tolerant: one corrupt PDF is
//! recorded as failed and the batch moves on. A failed file is left absent
//! from the output directory, so the next run retries it.

mod assemble;
mod error;
mod manager;
mod render;

pub use error::{ConvertError, ConvertFailure};
pub use manager::{
    ConversionOutcome, ConversionRecord, ConvertSettings, DEFAULT_DPI, DEFAULT_JPEG_QUALITY, run,
};
