//! Lectern Core Library
//!
//! This library crawls a pattern-defined hierarchy of course pages
//! (course site → week pages → lecture pages), downloads every linked
//! PDF exactly once, and re-encodes image-only PDFs into much smaller
//! lossy ones. Reruns are idempotent: files already on disk are never
//! fetched or converted again, and sequence-numbered filenames stay
//! stable across runs.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`pattern`] - glob-style path patterns for link selection
//! - [`fetch`] - HTTP fetch primitive
//! - [`collect`] - per-page link collection with same-origin filtering
//! - [`traverse`] - staged page traversal (0-2 levels deep)
//! - [`download`] - deduplicated, sequence-numbered PDF downloads
//! - [`convert`] - batch rasterize-and-re-encode of downloaded PDFs
//! - [`config`] / [`pipeline`] - crawl configuration and orchestration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collect;
pub mod config;
pub mod convert;
pub mod download;
pub mod fetch;
pub mod pattern;
pub mod pipeline;
pub mod traverse;

// Re-export commonly used types
pub use config::{ConfigError, CrawlConfig};
pub use convert::{ConversionOutcome, ConversionRecord, ConvertError, ConvertSettings};
pub use download::{DownloadError, DownloadOutcome, DownloadRecord};
pub use fetch::{FetchError, HttpClient};
pub use pattern::{PathPattern, PatternError};
pub use pipeline::{PipelineError, PipelineReport};
