//! Crawl configuration.
//!
//! An explicit configuration struct is the only way into the pipeline;
//! any prompting or flag parsing lives outside the library (see the
//! binary's CLI adapter). Pattern strings are compiled here, so malformed
//! patterns fail before any network activity.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::pattern::{PathPattern, PatternError};

/// Name of the subdirectory holding converted output, inside the
/// download directory.
pub const IMAGE_SUBDIR: &str = "image";

/// Errors building a [`CrawlConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A traversal pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Everything the pipeline needs to know about one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The page the traversal starts from.
    pub start_url: Url,
    /// Pattern selecting week pages linked from the start page;
    /// `None` means the start page itself is the only page.
    pub week_pattern: Option<PathPattern>,
    /// Pattern selecting lecture pages linked from each week page;
    /// `None` stops the traversal at the week level. Ignored when
    /// `week_pattern` is `None`.
    pub lecture_pattern: Option<PathPattern>,
    /// Optional subdirectory of the output root for this invocation.
    pub subdir: Option<String>,
}

impl CrawlConfig {
    /// Builds a config from raw pattern strings.
    ///
    /// An empty (or whitespace-only) pattern string means "do not
    /// traverse this level" and maps to `None`; it is never compiled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if a non-empty pattern does not
    /// compile.
    pub fn new(
        start_url: Url,
        week_pattern: &str,
        lecture_pattern: &str,
        subdir: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            start_url,
            week_pattern: compile_optional(week_pattern)?,
            lecture_pattern: compile_optional(lecture_pattern)?,
            subdir: subdir.filter(|s| !s.is_empty()),
        })
    }

    /// The download directory for this crawl: `root`, plus the optional
    /// per-invocation subdirectory.
    #[must_use]
    pub fn download_dir(&self, root: &Path) -> PathBuf {
        match &self.subdir {
            Some(subdir) => root.join(subdir),
            None => root.to_path_buf(),
        }
    }
}

fn compile_optional(pattern: &str) -> Result<Option<PathPattern>, PatternError> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let compiled = PathPattern::compile(trimmed)?;
    debug!(
        pattern = compiled.as_str(),
        absolute = compiled.is_absolute(),
        "pattern compiled"
    );
    Ok(Some(compiled))
}
