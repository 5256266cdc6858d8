use std::panic;

use ego_tree::NodeRef;
use feed_logging::feed_warn;
use feedsnap_core::TextExtractor;
use scraper::node::Node;
use scraper::Html;

/// Plain-text extraction for feed summaries on top of html5ever.
///
/// - `script`/`style` subtrees are dropped
/// - entities are decoded by the parser
/// - block boundaries and `<br>` become spaces
/// - whitespace runs collapse to one space, ends trimmed
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperTextExtractor;

impl TextExtractor for ScraperTextExtractor {
    fn to_plain_text(&self, html: &str) -> String {
        if html.trim().is_empty() {
            return String::new();
        }
        match panic::catch_unwind(|| extract_text(html)) {
            Ok(text) => text,
            Err(_) => {
                feed_warn!("Failed to parse HTML, keeping the raw text");
                html.to_string()
            }
        }
    }
}

fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    collect_text(fragment.tree.root(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            let name = element.name();
            if matches!(name, "script" | "style") {
                return;
            }
            let block = is_block(name);
            if block {
                out.push(' ');
            }
            for child in node.children() {
                collect_text(child, out);
            }
            if block {
                out.push(' ');
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "br" | "p" | "div" | "section" | "article" | "header" | "footer" | "li" | "ul" | "ol"
            | "table" | "tr" | "td" | "th" | "blockquote" | "pre" | "h1" | "h2" | "h3" | "h4"
            | "h5" | "h6" | "hr" | "figure" | "figcaption"
    )
}
