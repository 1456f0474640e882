//! HTML content extraction
//!
//! Turns a fetched page into its text payload plus the sets of absolute image
//! and link URLs found in the markup. Extraction never fails: malformed
//! markup degrades to whatever was parseable, and a page with no recoverable
//! text, links, or images yields a valid empty [`ExtractedPage`].

use crate::crawler::fetcher::PageContent;
use crate::url::normalize_url;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracted information from one HTML page
///
/// The URL sets are ordered so that extraction is deterministic: running it
/// twice over the same content yields identical results, and the orchestrator
/// enqueues discovered links in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Visible text, one trimmed non-empty line per text node
    pub text: String,

    /// Absolute, normalized URLs of embedded images
    pub image_urls: BTreeSet<Url>,

    /// Absolute, normalized URLs of outbound links
    pub link_urls: BTreeSet<Url>,
}

/// Extracts text, image URLs, and link URLs from a fetched page
///
/// Relative URLs are resolved against the page's final (post-redirect) URL.
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolving to http(s).
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:`, and `data:` schemes,
/// fragment-only hrefs, and anchors carrying the `download` attribute.
///
/// # Arguments
///
/// * `content` - The fetched page
///
/// # Returns
///
/// The extracted page; never an error.
pub fn extract(content: &PageContent) -> ExtractedPage {
    let document = Html::parse_document(&content.body);
    let base_url = &content.final_url;

    let text = extract_text(&document);
    let image_urls = extract_image_urls(&document, base_url);
    let link_urls = extract_link_urls(&document, base_url);

    ExtractedPage {
        text,
        image_urls,
        link_urls,
    }
}

/// Collects the page's visible text, skipping script/style/noscript subtrees
fn extract_text(document: &Html) -> String {
    let mut lines = Vec::new();
    collect_text(document.root_element(), &mut lines);
    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    if matches!(element.value().name(), "script" | "style" | "noscript") {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, lines);
        }
    }
}

/// Collects absolute image URLs from `img[src]` elements
fn extract_image_urls(document: &Html, base_url: &Url) -> BTreeSet<Url> {
    let mut urls = BTreeSet::new();

    if let Ok(selector) = Selector::parse("img[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                if let Some(resolved) = resolve_link(src, base_url) {
                    urls.insert(resolved);
                }
            }
        }
    }

    urls
}

/// Collects absolute link URLs from `a[href]` elements
fn extract_link_urls(document: &Html, base_url: &Url) -> BTreeSet<Url> {
    let mut urls = BTreeSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            // Download links point at files, not pages
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_link(href, base_url) {
                    urls.insert(resolved);
                }
            }
        }
    }

    urls
}

/// Resolves an href to an absolute, normalized URL
///
/// Returns None if the link should be excluded:
/// - `javascript:`, `mailto:`, `tel:` schemes
/// - `data:` URIs
/// - Fragment-only hrefs (same page anchors)
/// - Anything that does not resolve to http(s)
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
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

    if href.starts_with('#') {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> PageContent {
        PageContent {
            final_url: Url::parse("https://example.com/page").unwrap(),
            content_type: "text/html".to_string(),
            body: body.to_string(),
        }
    }

    fn links(extracted: &ExtractedPage) -> Vec<&str> {
        extracted.link_urls.iter().map(|u| u.as_str()).collect()
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let extracted = extract(&page(
            r#"<html><head><style>.x { color: red; }</style>
            <script>var hidden = 1;</script></head>
            <body><p>Hello</p><p>World</p></body></html>"#,
        ));
        assert_eq!(extracted.text, "Hello\nWorld");
    }

    #[test]
    fn test_extract_text_collapses_blank_lines() {
        let extracted = extract(&page(
            "<html><body><p>  one  </p>\n\n\n<div>\n  <span>two</span>\n</div></body></html>",
        ));
        assert_eq!(extracted.text, "one\ntwo");
    }

    #[test]
    fn test_empty_page_is_valid() {
        let extracted = extract(&page("<html><body></body></html>"));
        assert!(extracted.text.is_empty());
        assert!(extracted.image_urls.is_empty());
        assert!(extracted.link_urls.is_empty());
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        let extracted = extract(&page("<html><body><p>ok<a href=\"/x\">link</div>"));
        assert!(extracted.text.contains("ok"));
        assert_eq!(links(&extracted), vec!["https://example.com/x"]);
    }

    #[test]
    fn test_extract_absolute_link() {
        let extracted = extract(&page(
            r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#,
        ));
        assert_eq!(links(&extracted), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let extracted = extract(&page(r#"<html><body><a href="/other">Link</a></body></html>"#));
        assert_eq!(links(&extracted), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let extracted = extract(&page(r#"<html><body><a href="other">Link</a></body></html>"#));
        assert_eq!(links(&extracted), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_javascript_mailto_tel_data() {
        let extracted = extract(&page(
            r#"<html><body>
                <a href="javascript:void(0)">A</a>
                <a href="mailto:test@example.com">B</a>
                <a href="tel:+1234567890">C</a>
                <a href="data:text/html,<h1>D</h1>">D</a>
            </body></html>"#,
        ));
        assert!(extracted.link_urls.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let extracted = extract(&page(
            r##"<html><body><a href="#section">Jump</a></body></html>"##,
        ));
        assert!(extracted.link_urls.is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let extracted = extract(&page(
            r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#,
        ));
        assert!(extracted.link_urls.is_empty());
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let extracted = extract(&page(
            r#"<html><body>
                <a href="/page1">One</a>
                <a href="/page1#top">One again</a>
                <a href="/page1">And again</a>
            </body></html>"#,
        ));
        assert_eq!(links(&extracted), vec!["https://example.com/page1"]);
    }

    #[test]
    fn test_extract_images() {
        let extracted = extract(&page(
            r#"<html><body>
                <img src="/a.png">
                <img src="https://cdn.example.com/b.jpg">
                <img alt="no source">
            </body></html>"#,
        ));
        let images: Vec<&str> = extracted.image_urls.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            images,
            vec!["https://cdn.example.com/b.jpg", "https://example.com/a.png"]
        );
    }

    #[test]
    fn test_duplicate_images_collapse() {
        let extracted = extract(&page(
            r#"<html><body><img src="/a.png"><img src="/a.png"></body></html>"#,
        ));
        assert_eq!(extracted.image_urls.len(), 1);
    }

    #[test]
    fn test_skip_data_uri_images() {
        let extracted = extract(&page(
            r#"<html><body><img src="data:image/png;base64,iVBORw0"></body></html>"#,
        ));
        assert!(extracted.image_urls.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content = page(
            r#"<html><body><p>text</p><a href="/x">x</a><img src="/i.png"></body></html>"#,
        );
        assert_eq!(extract(&content), extract(&content));
    }
}
