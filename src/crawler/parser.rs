//! Link extraction
//!
//! Pulls candidate links out of a fetched page. Every `<a>` tag with a
//! non-empty `href` contributes one URL, resolved against the page's own
//! URL and stripped of its fragment. The result is a set, so a page that
//! links to the same target fifty times yields it once.
//!
//! Extraction is deliberately permissive: scheme and domain rules live in
//! the link filter, not here, so `mailto:` and friends survive extraction
//! and are rejected at filter time.

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::url::normalize_url;

/// Extracts the set of absolute, fragment-free link targets from a page.
///
/// Unresolvable `href` values are skipped; the parser itself recovers
/// from arbitrary tag soup, so this never fails.
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<Url> {
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return HashSet::new(),
    };

    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };
        if href.is_empty() {
            continue;
        }
        match base_url.join(href) {
            Ok(absolute) => {
                links.insert(normalize_url(&absolute));
            }
            Err(err) => {
                debug!("Skipping unresolvable href {:?} on {}: {}", href, base_url, err);
            }
        }
    }

    links
}
