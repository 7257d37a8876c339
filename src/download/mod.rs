//! PDF download manager: scan pages for PDF links, download each distinct
//! URL exactly once, and keep reruns idempotent.
//!
//! # Features
//!
//! - Run-global sequence numbering: every distinct PDF URL gets the next
//!   index in page-then-anchor order, so filenames are stable across runs
//!   (skip-set hits still advance the index).
//! - Presence-based skip: a filename already in the destination directory
//!   is never fetched again.
//! - Atomic writes: bodies land in a `.part` file renamed into place on
//!   success, so an interrupted run never leaves a truncated file the
//!   skip detector would mistake for a finished one.
//! - JSON manifest of the run's records, written alongside the files.
//!
//! # Example
//!
//! ```no_run
//! use lectern_core::download;
//! use lectern_core::fetch::HttpClient;
//! use std::collections::BTreeSet;
//! use std::path::Path;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let pages = BTreeSet::from([Url::parse("https://example.edu/week1.html")?]);
//! let records = download::run(&client, &pages, Path::new("./downloads"), "").await?;
//! println!("{} PDFs handled", records.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
pub mod manifest;

pub use error::DownloadError;
pub use manager::{DownloadOutcome, DownloadRecord, run};
