//! Link collection: fetch one page and return the matching same-origin links.
//!
//! Anchors are extracted in document order, resolved against the page URL,
//! filtered to the page's origin, then filtered by a [`PathPattern`]. The
//! result is a [`BTreeSet`] so every caller iterates discovered pages in
//! lexicographic URL order, which keeps downstream sequence numbering
//! deterministic across runs.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::fetch::{FetchError, HttpClient};
use crate::pattern::PathPattern;

#[allow(clippy::expect_used)]
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Fetches `page_url` and returns every same-origin link matching `pattern`.
///
/// Cross-origin links (different scheme or host) are never followed.
/// Duplicate hrefs collapse by exact URL equality.
///
/// # Errors
///
/// Propagates any [`FetchError`]; a page that cannot be fetched aborts the
/// crawl rather than being silently skipped.
pub async fn collect(
    client: &HttpClient,
    page_url: &Url,
    pattern: &PathPattern,
) -> Result<BTreeSet<Url>, FetchError> {
    let markup = client.fetch_text(page_url).await?;
    let links = links_matching(&markup, page_url, pattern);
    debug!(page = %page_url, links = links.len(), "collected links");
    Ok(links)
}

/// Pure extraction half of [`collect`]: markup in, matching link set out.
#[must_use]
pub fn links_matching(markup: &str, page_url: &Url, pattern: &PathPattern) -> BTreeSet<Url> {
    let mut links = BTreeSet::new();
    for href in extract_hrefs(markup) {
        let Ok(resolved) = page_url.join(&href) else {
            debug!(href = %href, "ignoring unresolvable href");
            continue;
        };
        if !same_origin(&resolved, page_url) {
            continue;
        }
        if pattern.matches_url(&resolved) {
            links.insert(resolved);
        }
    }
    links
}

/// Extracts the `href` of every anchor in `markup`, in document order.
/// Anchors without an `href` attribute are ignored.
#[must_use]
pub fn extract_hrefs(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Returns true if both URLs share an origin (scheme and host).
#[must_use]
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme() && a.host_str() == b.host_str()
}
