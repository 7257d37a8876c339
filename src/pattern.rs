//! Glob-style path patterns for selecting which links to follow.
//!
//! A pattern is a plain path string in which `*` matches one or more
//! non-slash characters; every other character matches itself. Patterns
//! come in two flavors, decided by a leading `/`:
//!
//! - *Absolute* (`/week*/index.html`): matched against the full URL path,
//!   leading slash included.
//! - *Suffix* (`lecture*.html`): matched against only the final
//!   `/`-delimited segment of the URL path.
//!
//! Matches are always whole-string: `*.pdf` does not match `notes.pdf.bak`.

use regex::Regex;
use thiserror::Error;
use url::Url;

/// Errors from pattern compilation.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The translated expression was rejected by the regex engine.
    #[error("invalid path pattern {pattern:?}: {source}")]
    Compile {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The underlying regex build error.
        #[source]
        source: regex::Error,
    },
}

/// A compiled path pattern.
///
/// Compilation escapes every regex metacharacter in the input and rewrites
/// each `*` to "one or more non-slash characters", anchored at both ends,
/// so a compiled pattern is a total predicate over candidate strings.
///
/// An empty pattern compiles to a matcher that accepts only the empty
/// string. Callers that treat an empty pattern as "do not traverse this
/// level" must branch before compiling (see [`CrawlConfig`]).
///
/// [`CrawlConfig`]: crate::config::CrawlConfig
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    is_absolute: bool,
}

impl PathPattern {
    /// Compiles a glob pattern into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Compile`] if the regex engine rejects the
    /// translated expression.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');
        for ch in pattern.chars() {
            if ch == '*' {
                expr.push_str("[^/]+");
            } else {
                // regex::escape only takes &str; escape one char at a time
                // so the wildcard itself is never escaped.
                expr.push_str(&regex::escape(&ch.to_string()));
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|source| PatternError::Compile {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
            is_absolute: pattern.starts_with('/'),
        })
    }

    /// Returns true if `candidate` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Returns true if this pattern is matched against the full URL path
    /// rather than only its final segment.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    /// The pattern string as supplied to [`PathPattern::compile`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tests a URL against this pattern.
    ///
    /// Absolute patterns see the URL's full path (leading slash included);
    /// suffix patterns see only the text after the last `/` of the path.
    #[must_use]
    pub fn matches_url(&self, url: &Url) -> bool {
        let path = url.path();
        let subject = if self.is_absolute {
            path
        } else {
            path.rsplit('/').next().unwrap_or(path)
        };
        self.matches(subject)
    }
}
