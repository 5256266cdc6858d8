use scraper::{Html, Selector};
use url::Url;

const FEED_MIME_TYPES: &[&str] = &["application/rss+xml", "application/atom+xml"];

/// Find feed URLs advertised by `<link type="application/rss+xml">` (or Atom)
/// elements, resolved against `page_url`, in document order without duplicates.
pub fn discover_feed_links(html: &str, page_url: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse("link[type][href]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let mut links: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let value = element.value();
        if !value.attr("type").is_some_and(is_feed_type) {
            continue;
        }
        let Some(url) = value
            .attr("href")
            .and_then(|href| resolve_url(href, base.as_ref()))
        else {
            continue;
        };
        let url = String::from(url);
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

fn is_feed_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or(value).trim();
    FEED_MIME_TYPES
        .iter()
        .any(|feed_type| feed_type.eq_ignore_ascii_case(mime))
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_type_ignores_parameters_and_case() {
        assert!(is_feed_type("Application/RSS+XML; charset=utf-8"));
        assert!(!is_feed_type("text/css"));
    }

    #[test]
    fn resolve_skips_fragments_and_scripts() {
        let base = Url::parse("https://example.com/blog/").ok();
        assert!(resolve_url("#top", base.as_ref()).is_none());
        assert!(resolve_url("javascript:void(0)", base.as_ref()).is_none());
        assert_eq!(
            resolve_url("feed.xml", base.as_ref()).map(String::from).as_deref(),
            Some("https://example.com/blog/feed.xml")
        );
    }
}
