use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use feed_logging::feed_warn;
use url::Url;

/// Decode a fetched HTML page into UTF-8.
///
/// Order: BOM, then the Content-Type charset, then chardetng detection hinted
/// with the page's top-level domain. Malformed sequences become U+FFFD.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>, page_url: Option<&str>) -> String {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let tld = page_url.and_then(top_level_domain);
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(tld.as_deref().map(str::as_bytes), true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn top_level_domain(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let host = url.host_str()?;
    host.rsplit('.')
        .next()
        .filter(|tld| tld.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_lowercase)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> String {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        feed_warn!("Page is not valid {}; replaced malformed bytes", enc.name());
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(
            extract_charset("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn tld_hint_skips_ip_hosts() {
        assert_eq!(top_level_domain("https://example.de/x").as_deref(), Some("de"));
        assert_eq!(top_level_domain("http://127.0.0.1:8080/"), None);
    }
}
