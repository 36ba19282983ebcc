#![forbid(unsafe_code)]

//! Current-page link selection.
//!
//! The page identifier is the last `/`-separated segment of the location
//! path, falling back to the index document when that segment is empty
//! (`/`, `/blog/`, or an empty path). A link is current when its raw `href`
//! attribute equals the identifier; no URL resolution is attempted.

use tracing::debug;

const LOG_TARGET: &str = "sitenav.active_link";

/// Page identifier for `path`, using `index_document` for an empty final segment.
#[must_use]
pub fn current_page_id<'a>(path: &'a str, index_document: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => index_document,
    }
}

/// True when an anchor's `href` attribute marks it as the current page.
///
/// An anchor without an `href` never matches.
#[must_use]
pub fn is_current_link(href: Option<&str>, page_id: &str) -> bool {
    href.is_some_and(|href| href == page_id)
}

/// Indices of the `hrefs` matching the page at `path`.
///
/// Uniqueness is not enforced: every matching link is returned.
pub fn matching_links<'h, I>(path: &str, index_document: &str, hrefs: I) -> Vec<usize>
where
    I: IntoIterator<Item = Option<&'h str>>,
{
    let page_id = current_page_id(path, index_document);
    let mut scanned = 0usize;
    let matches: Vec<usize> = hrefs
        .into_iter()
        .enumerate()
        .inspect(|_| scanned += 1)
        .filter_map(|(idx, href)| is_current_link(href, page_id).then_some(idx))
        .collect();
    debug!(
        target: LOG_TARGET,
        page = page_id,
        scanned,
        matched = matches.len(),
        "active link pass"
    );
    matches
}
