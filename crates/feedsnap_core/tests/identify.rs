use feedsnap_core::{identify, source_title};
use pretty_assertions::assert_eq;

#[test]
fn identify_is_deterministic() {
    let url = "https://blog.example.com/posts/feed.xml";
    assert_eq!(identify(url), identify(url));
}

#[test]
fn cisa_urls_map_to_fixed_id_regardless_of_path() {
    assert_eq!(identify("https://www.cisa.gov/cybersecurity-advisories/all.xml"), "cisa-gov");
    assert_eq!(identify("https://us-cert.cisa.gov/ncas/alerts.xml"), "cisa-gov");
    assert_eq!(identify("http://CISA.gov"), "cisa-gov");
}

#[test]
fn feeder_discovery_feeds_include_truncated_key() {
    assert_eq!(
        identify("https://feeder.co/discover/0123456789abcdef/rss"),
        "feeder-co-discover-0123456789ab"
    );
    assert_eq!(identify("https://feeder.co/discover/short"), "feeder-co-discover-short");
    assert_eq!(identify("https://feeder.co/pricing"), "feeder-co");
}

#[test]
fn cyberwire_maps_to_fixed_id() {
    assert_eq!(identify("https://thecyberwire.com/feeds/rss.xml"), "cyberwire");
    assert_eq!(identify("https://www.thecyberwire.com/podcasts"), "cyberwire");
}

#[test]
fn generic_id_uses_first_label_and_path_prefix() {
    assert_eq!(identify("https://www.example.com/"), "example");
    assert_eq!(identify("https://blog.rust-lang.org/feed.xml"), "blog-feed-xml");
    assert_eq!(
        identify("https://example.com/a/very/long/path/that/keeps/going.rss"),
        "example-a-very-long-path-tha"
    );
}

#[test]
fn non_ascii_urls_keep_readable_ids() {
    assert_eq!(identify("https://example.com/\u{65b0}\u{95fb}"), "example-\u{65b0}\u{95fb}");
    assert_eq!(identify("https://example.com/caf%C3%A9/rss"), "example-caf\u{e9}-rss");
    assert_eq!(identify("https://b\u{fc}cher.de/feed"), "b\u{fc}cher-feed");
    assert_eq!(source_title(None, "https://b\u{fc}cher.de/feed"), "B\u{dc}CHER");
}

#[test]
fn identify_accepts_scheme_less_input_and_never_returns_empty() {
    assert_eq!(identify("example.org/news"), "example-news");
    assert_eq!(identify(""), "feed");
    assert!(!identify("::::").is_empty());
}

#[test]
fn source_title_prefers_parsed_title() {
    assert_eq!(source_title(Some("  My Blog "), "https://example.com/feed"), "My Blog");
}

#[test]
fn source_title_falls_back_to_known_domain_then_host() {
    assert_eq!(
        source_title(None, "https://www.cisa.gov/advisories.xml"),
        "CISA Cybersecurity Advisories"
    );
    assert_eq!(source_title(Some(""), "https://thecyberwire.com/rss"), "The CyberWire");
    assert_eq!(source_title(None, "https://www.example.com/rss"), "EXAMPLE");
    assert_eq!(source_title(None, ""), "Unknown Feed");
}
