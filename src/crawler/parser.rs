//! HTML parser producing the crawler's page snapshot
//!
//! A fetched page is parsed once into a [`Document`]: the title, the visible
//! text, every hyperlink resolved to an absolute URL, and the list-item and
//! paragraph text the recipe heuristics look at. The snapshot owns plain
//! strings, so it can cross task boundaries and be handed from the crawler to
//! the link extractor without a second fetch.

use crate::FetchError;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// A paragraph element with its `class` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Raw `class` attribute value (empty when absent)
    pub class: String,

    /// Paragraph text, whitespace collapsed
    pub text: String,
}

/// Parsed representation of a single fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// URL the page was fetched from (after redirects)
    pub url: String,

    /// Text of the first `<title>` element, whitespace collapsed
    pub title: String,

    /// All visible text of the page, whitespace collapsed
    pub text: String,

    /// Absolute URLs of every `<a href>` in document order
    pub links: Vec<String>,

    /// Text of every `<li>` in document order
    pub list_items: Vec<String>,

    /// Every `<p>` in document order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parses HTML content, resolving relative links against `base_url`
    ///
    /// # Example
    ///
    /// ```
    /// use recipe_crawler::crawler::Document;
    /// use url::Url;
    ///
    /// let html = r#"<html><head><title>Test</title></head><body><a href="/recipes/1">Link</a></body></html>"#;
    /// let base_url = Url::parse("https://example.com/").unwrap();
    /// let doc = Document::parse(html, &base_url);
    /// assert_eq!(doc.title, "Test");
    /// assert_eq!(doc.links, vec!["https://example.com/recipes/1".to_string()]);
    /// ```
    pub fn parse(html: &str, base_url: &Url) -> Self {
        let document = Html::parse_document(html);

        Self {
            url: base_url.to_string(),
            title: extract_title(&document),
            text: extract_text(&document),
            links: extract_links(&document, base_url),
            list_items: select_texts(&document, "li"),
            paragraphs: extract_paragraphs(&document),
        }
    }

    /// Parses HTML content fetched from a URL given as a string
    pub fn from_html(url: &str, html: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(html, &base_url))
    }
}

/// Rendered text of an element, whitespace collapsed
///
/// Inline markup adds no separator: `<li><b>Total</b>: 20 min</li>` reads
/// `"Total: 20 min"`.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    rendered_text(*element)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element_text(&element))
        .unwrap_or_default()
}

/// Elements whose boundaries separate words in rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

fn is_block(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| BLOCK_ELEMENTS.contains(&element.name()))
}

fn extract_text(document: &Html) -> String {
    rendered_text(document.root_element())
}

/// Concatenates every text node under `root` outside `<script>` and `<style>`
///
/// A space is inserted only where a block element opens or closes, so
/// `<h2>A</h2><h2>B</h2>` reads `"A B"` while `<b>A</b>B` reads `"AB"`.
fn rendered_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in root.descendants() {
        if is_block(node.value()) {
            text.push(' ');
            continue;
        }

        let Node::Text(content) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| name == "script" || name == "style");
        if hidden {
            continue;
        }

        if node
            .prev_sibling()
            .is_some_and(|sibling| is_block(sibling.value()))
        {
            text.push(' ');
        }
        text.push_str(content);
    }

    collapse_whitespace(&text)
}

fn select_texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element_text(&element))
        .collect()
}

fn extract_paragraphs(document: &Html) -> Vec<Paragraph> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| Paragraph {
            class: element.value().attr("class").unwrap_or_default().to_string(),
            text: element_text(&element),
        })
        .collect()
}

/// Extracts all resolvable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link can never be fetched:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
