//! Page traversal: turn one start URL plus up to two patterns into the
//! final set of pages that will be scanned for downloadable files.
//!
//! Depth is inferred from which patterns the caller supplies, so a flat
//! course page, a term → week layout, and a term → week → lecture layout
//! are all covered without hardcoding hierarchy depth:
//!
//! - no week pattern: the start page itself is the only page;
//! - week pattern only: the pages linked from the start page;
//! - both patterns: the pages linked from each discovered week page.

use std::collections::BTreeSet;

use tracing::info;
use url::Url;

use crate::collect;
use crate::fetch::{FetchError, HttpClient};
use crate::pattern::PathPattern;

/// Resolves the set of pages to scan for PDF links.
///
/// `week_pattern == None` means "do not traverse" (the empty-pattern case
/// is mapped to `None` at the configuration boundary); likewise for
/// `lecture_pattern`. Week pages are visited in lexicographic URL order.
///
/// # Errors
///
/// Propagates the first [`FetchError`]; a page that cannot be fetched
/// aborts the traversal.
pub async fn resolve_pages(
    client: &HttpClient,
    start_url: &Url,
    week_pattern: Option<&PathPattern>,
    lecture_pattern: Option<&PathPattern>,
) -> Result<BTreeSet<Url>, FetchError> {
    let Some(week_pattern) = week_pattern else {
        info!(page = %start_url, "single-page mode");
        return Ok(BTreeSet::from([start_url.clone()]));
    };

    let weeks = collect::collect(client, start_url, week_pattern).await?;
    let Some(lecture_pattern) = lecture_pattern else {
        info!(pages = weeks.len(), "week-level traversal complete");
        return Ok(weeks);
    };

    let mut pages = BTreeSet::new();
    for week in &weeks {
        let lectures = collect::collect(client, week, lecture_pattern).await?;
        pages.extend(lectures);
    }
    info!(
        weeks = weeks.len(),
        pages = pages.len(),
        "lecture-level traversal complete"
    );
    Ok(pages)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_week_pattern_returns_start_url_without_fetching() {
        // Unroutable client: any fetch attempt would fail, proving none happen.
        let client = HttpClient::new_with_timeouts(1, 1);
        let start = Url::parse("https://a.edu/course/index.html").unwrap();
        let pages = resolve_pages(&client, &start, None, None).await.unwrap();
        assert_eq!(pages, BTreeSet::from([start]));
    }
}
