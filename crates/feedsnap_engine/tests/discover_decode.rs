use feedsnap_engine::{decode_html, discover_feed_links};
use pretty_assertions::assert_eq;

#[test]
fn finds_rss_and_atom_links_in_document_order() {
    let html = r#"<html><head>
        <link rel="stylesheet" type="text/css" href="/style.css">
        <link rel="alternate" type="application/atom+xml" href="/atom.xml">
        <link rel="alternate" type="application/rss+xml" href="https://feeds.example.net/rss">
        <link rel="alternate" type="application/atom+xml" href="/atom.xml">
        </head><body></body></html>"#;
    let links = discover_feed_links(html, "https://example.com/blog/post");
    assert_eq!(
        links,
        vec![
            "https://example.com/atom.xml".to_string(),
            "https://feeds.example.net/rss".to_string(),
        ]
    );
}

#[test]
fn relative_hrefs_resolve_against_page_url() {
    let html = r#"<link type="application/rss+xml" href="feed.rss">"#;
    let links = discover_feed_links(html, "https://example.com/blog/");
    assert_eq!(links, vec!["https://example.com/blog/feed.rss".to_string()]);
}

#[test]
fn page_without_feed_links_yields_nothing() {
    let html = "<html><head><title>x</title></head><body><a href='/rss'>rss</a></body></html>";
    assert!(discover_feed_links(html, "https://example.com/").is_empty());
}

#[test]
fn decode_respects_charset_header() {
    let html = decode_html(b"caf\xe9", Some("text/html; charset=ISO-8859-1"), None);
    assert_eq!(html, "caf\u{e9}");
}

#[test]
fn decode_handles_utf8_bom() {
    let html = decode_html(b"\xEF\xBB\xBFhello", Some("text/html"), Some("https://example.com/"));
    assert_eq!(html, "hello");
}

#[test]
fn stray_byte_in_utf8_page_is_replaced() {
    let html = decode_html(b"<p>caf\xe9</p>", Some("text/html; charset=utf-8"), None);
    assert_eq!(html, "<p>caf\u{fffd}</p>");
}
