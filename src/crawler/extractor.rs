//! Content extraction
//!
//! Turns a fetched HTML body into the two artifacts the report carries:
//! a markdown rendition of the page (links preserved, no hard wrapping)
//! and a small structural summary of it. Extraction never fails; a page
//! that defeats the converter yields empty markdown, and missing elements
//! leave their metadata fields empty.

use scraper::{Html, Node, Selector};
use serde::Serialize;
use tracing::warn;

/// Upper bound on the number of h2 headings kept in the metadata.
const MAX_H2_TAGS: usize = 10;

/// Tags whose text content is invisible to a reader.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript"];

/// Structural summary of a crawled page.
#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    /// Trimmed text of the first `<title>` element; empty when absent.
    pub title: String,
    /// Content of `<meta name="description">`; empty when absent.
    pub description: String,
    /// Text of every h1 heading, in document order.
    pub h1_tags: Vec<String>,
    /// Text of the first ten h2 headings, in document order.
    pub h2_tags: Vec<String>,
    /// Whitespace-separated word count of the visible text.
    pub word_count: usize,
}

/// Converts an HTML body to markdown.
///
/// Links survive as markdown links and no hard line wrapping is applied,
/// so the output is suitable for downstream text processing. Conversion
/// failures are logged and produce an empty string rather than aborting
/// the page.
pub fn extract_markdown(html: &str) -> String {
    match htmd::convert(html) {
        Ok(markdown) => markdown,
        Err(err) => {
            warn!("Markdown conversion failed: {}", err);
            String::new()
        }
    }
}

/// Extracts the structural summary of an HTML body.
///
/// Never fails: malformed markup is parsed leniently and anything not
/// found is left empty.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    let mut h2_tags = heading_text(&document, "h2");
    h2_tags.truncate(MAX_H2_TAGS);

    PageMetadata {
        title: title_text(&document),
        description: meta_description(&document),
        h1_tags: heading_text(&document, "h1"),
        h2_tags,
        word_count: visible_text(&document).split_whitespace().count(),
    }
}

fn title_text(document: &Html) -> String {
    let selector = match Selector::parse("title") {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn meta_description(document: &Html) -> String {
    let selector = match Selector::parse(r#"meta[name="description"]"#) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

fn heading_text(document: &Html, tag: &str) -> Vec<String> {
    let selector = match Selector::parse(tag) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };
    document
        .select(&selector)
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .collect()
}

/// Collects the text a reader would actually see, skipping text inside
/// script, style, and noscript elements.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if HIDDEN_TAGS.contains(&el.name()))
            });
            if !hidden {
                out.push_str(text);
                out.push(' ');
            }
        }
    }
    out
}
