use std::sync::Once;

use feedsnap_core::NormalizeSettings;
use feedsnap_engine::{collect_feeds, FetchSettings, ReqwestFetcher, ScraperTextExtractor};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn item(n: usize, with_link: bool, description: &str) -> String {
    let link = if with_link {
        format!("<link>https://example.com/{n}</link>")
    } else {
        String::new()
    };
    format!(
        "<item><title>Item {n}</title>{link}<description><![CDATA[{description}]]></description>\
         <pubDate>Tue, 07 Sep 2021 10:00:00 +0000</pubDate></item>"
    )
}

fn rss(title: &str, items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>{title}</title><link>https://example.com/</link><description>mock</description>{}</channel></rss>"#,
        items.concat()
    )
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/rss+xml"))
        .mount(server)
        .await;
}

async fn collect(urls: &[String]) -> Vec<feedsnap_core::FeedSource> {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    collect_feeds(
        &fetcher,
        urls,
        &NormalizeSettings::default(),
        &ScraperTextExtractor,
    )
    .await
}

#[tokio::test]
async fn three_entry_feed_yields_three_items() {
    init_logging();
    let server = MockServer::start().await;
    let items: Vec<String> = (0..3).map(|n| item(n, true, "plain")).collect();
    serve(&server, "/feed.xml", rss("Three", &items)).await;

    let url = format!("{}/feed.xml", server.uri());
    let feeds = collect(&[url.clone()]).await;

    assert_eq!(feeds.len(), 1);
    let feed = &feeds[0];
    assert_eq!(feed.title, "Three");
    assert_eq!(feed.final_url, url);
    assert_eq!(feed.id, "127-feed-xml");
    assert_eq!(feed.items.len(), 3);
    assert_eq!(feed.items[0].link, "https://example.com/0");
    assert_eq!(feed.items[0].published, "Tue, 07 Sep 2021 10:00:00 +0000");
}

#[tokio::test]
async fn entry_without_link_is_dropped() {
    init_logging();
    let server = MockServer::start().await;
    let items: Vec<String> = (0..5).map(|n| item(n, n != 3, "x")).collect();
    serve(&server, "/feed.xml", rss("Five", &items)).await;

    let feeds = collect(&[format!("{}/feed.xml", server.uri())]).await;
    let titles: Vec<&str> = feeds[0].items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Item 0", "Item 1", "Item 2", "Item 4"]);
}

#[tokio::test]
async fn summaries_are_cleaned_and_capped() {
    init_logging();
    let server = MockServer::start().await;
    let long = format!("<p>{}</p>", "word ".repeat(300));
    let items = vec![item(0, true, "<p>Hello&nbsp;World</p>"), item(1, true, &long)];
    serve(&server, "/feed.xml", rss("Summaries", &items)).await;

    let feeds = collect(&[format!("{}/feed.xml", server.uri())]).await;
    let items = &feeds[0].items;
    assert_eq!(items[0].summary, "Hello World");
    assert_eq!(items[1].summary.chars().count(), 500);
}

#[tokio::test]
async fn feed_is_capped_at_nine_items() {
    init_logging();
    let server = MockServer::start().await;
    let items: Vec<String> = (0..15).map(|n| item(n, true, "x")).collect();
    serve(&server, "/feed.xml", rss("Many", &items)).await;

    let feeds = collect(&[format!("{}/feed.xml", server.uri())]).await;
    assert_eq!(feeds[0].items.len(), 9);
    assert_eq!(feeds[0].items[8].title, "Item 8");
}

#[tokio::test]
async fn unresolvable_urls_are_skipped_and_order_is_kept() {
    init_logging();
    let server = MockServer::start().await;
    serve(&server, "/a.xml", rss("A", &[item(0, true, "a")])).await;
    serve(&server, "/b.xml", rss("B", &[item(0, true, "b")])).await;

    let urls = vec![
        format!("{}/a.xml", server.uri()),
        format!("{}/missing", server.uri()),
        format!("{}/b.xml", server.uri()),
    ];
    let feeds = collect(&urls).await;

    let titles: Vec<&str> = feeds.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}
