//! Content extraction from fetched markup
//!
//! This module turns raw HTML into:
//! - A plain-text document (title + visible body text)
//! - The ordered, deduplicated set of outbound links, resolved and normalized
//!   against the page URL

use crate::url::resolve_url;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text never counts as visible content
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Title and visible text of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Text of the `<title>` element, trimmed; empty if there is none
    pub title: String,

    /// Visible body text with every whitespace run collapsed to one space
    pub text: String,
}

impl ExtractedContent {
    /// Whether the page yielded text worth indexing
    pub fn is_indexable(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Everything the crawler needs from one page, from a single parse
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub content: ExtractedContent,

    /// Outbound links in first-seen order, no duplicates
    pub links: Vec<Url>,
}

/// Parses a page once and extracts its content, plus links if requested
///
/// # Example
///
/// ```
/// use haze_search::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url, true);
/// assert_eq!(parsed.content.title, "Test");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_page(html: &str, base_url: &Url, follow_links: bool) -> ParsedPage {
    let document = Html::parse_document(html);

    let links = if follow_links {
        links_from(&document, base_url)
    } else {
        Vec::new()
    };

    ParsedPage {
        content: content_from(&document),
        links,
    }
}

/// Extracts the title and visible text of a page
///
/// # Example
///
/// ```
/// use haze_search::crawler::extract_content;
///
/// let content = extract_content("<script>x</script><p>Hello   World</p>");
/// assert_eq!(content.text, "Hello World");
/// ```
pub fn extract_content(html: &str) -> ExtractedContent {
    content_from(&Html::parse_document(html))
}

/// Extracts every `<a href>` target, resolved against `base_url`
///
/// Links that fail to resolve or use a non-HTTP scheme are dropped silently.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    links_from(&Html::parse_document(html), base_url)
}

fn content_from(document: &Html) -> ExtractedContent {
    let title = match Selector::parse("title") {
        Ok(selector) => document
            .select(&selector)
            .flat_map(|element| element.text())
            .collect::<String>()
            .trim()
            .to_string(),
        Err(_) => String::new(),
    };

    let mut raw = String::new();
    if let Ok(body_selector) = Selector::parse("body") {
        for body in document.select(&body_selector) {
            collect_visible_text(body, &mut raw);
        }
    }

    ExtractedContent {
        title,
        text: collapse_whitespace(&raw),
    }
}

/// Appends the text of `element` to `out`, skipping hidden subtrees
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    if HIDDEN_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_visible_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn links_from(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| resolve_url(href, base_url).ok())
        .filter(|url| seen.insert(url.as_str().to_string()))
        .collect()
}
