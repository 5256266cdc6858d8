use percent_encoding::percent_decode_str;
use url::Url;

/// A publisher whose feeds get a hand-picked identifier and title.
struct KnownSource {
    domain: &'static str,
    id: &'static str,
    title: &'static str,
    /// Suffix the identifier with the `discover/<key>` path key when present.
    keyed_by_discovery: bool,
}

const KNOWN_SOURCES: &[KnownSource] = &[
    KnownSource {
        domain: "cisa.gov",
        id: "cisa-gov",
        title: "CISA Cybersecurity Advisories",
        keyed_by_discovery: false,
    },
    KnownSource {
        domain: "feeder.co",
        id: "feeder-co",
        title: "Feeder Discovery Feed",
        keyed_by_discovery: true,
    },
    KnownSource {
        domain: "thecyberwire.com",
        id: "cyberwire",
        title: "The CyberWire",
        keyed_by_discovery: false,
    },
];

const DISCOVERY_KEY_CHARS: usize = 12;
const PATH_ID_CHARS: usize = 20;
const FALLBACK_ID: &str = "feed";
const FALLBACK_TITLE: &str = "Unknown Feed";

/// Derive a short, stable identifier for a feed from its source URL.
///
/// Known publishers map to fixed identifiers; anything else becomes the first
/// host label plus a slice of the path, with dots and slashes turned into
/// hyphens. Never returns an empty string.
pub fn identify(url: &str) -> String {
    let Some(parsed) = parse_lenient(url) else {
        return FALLBACK_ID.to_string();
    };
    let host = normalized_host(&parsed);

    if let Some(known) = known_source(&host) {
        if known.keyed_by_discovery {
            if let Some(key) = discovery_key(&parsed) {
                let key: String = key.chars().take(DISCOVERY_KEY_CHARS).collect();
                return format!("{}-discover-{key}", known.id);
            }
        }
        return known.id.to_string();
    }

    generic_id(&host, parsed.path())
}

/// Display title for a feed: the parsed title when it has one, otherwise a
/// title derived from the URL.
pub fn source_title(parsed_title: Option<&str>, url: &str) -> String {
    if let Some(title) = parsed_title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let Some(parsed) = parse_lenient(url) else {
        return FALLBACK_TITLE.to_string();
    };
    let host = normalized_host(&parsed);
    if let Some(known) = known_source(&host) {
        return known.title.to_string();
    }

    match host.split('.').next() {
        Some(label) if !label.is_empty() => label.to_uppercase(),
        _ => FALLBACK_TITLE.to_string(),
    }
}

fn parse_lenient(url: &str) -> Option<Url> {
    let trimmed = url.trim();
    let has_host = |u: &Url| u.host_str().is_some_and(|h| !h.is_empty());
    Url::parse(trimmed)
        .ok()
        .filter(has_host)
        .or_else(|| {
            Url::parse(&format!("https://{trimmed}"))
                .ok()
                .filter(has_host)
        })
}

/// Lower-cased host without `www.`, with IDNA labels shown in Unicode.
fn normalized_host(url: &Url) -> String {
    let (host, _) = idna::domain_to_unicode(url.host_str().unwrap_or_default());
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn known_source(host: &str) -> Option<&'static KnownSource> {
    KNOWN_SOURCES.iter().find(|known| {
        host == known.domain
            || host
                .strip_suffix(known.domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn discovery_key(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "discover")?;
    segments
        .next()
        .filter(|key| !key.is_empty())
        .map(ToOwned::to_owned)
}

fn generic_id(host: &str, path: &str) -> String {
    let mut id = host.split('.').next().unwrap_or(host).to_string();
    let path = percent_decode_str(path).decode_utf8_lossy();
    let path = path.trim_matches('/').replace('/', "-");
    if !path.is_empty() {
        id.push('-');
        id.extend(path.chars().take(PATH_ID_CHARS));
    }
    let id = id.replace('.', "-");
    if id.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomain_match_requires_label_boundary() {
        assert!(known_source("us-cert.cisa.gov").is_some());
        assert!(known_source("notcisa.gov").is_none());
    }

    #[test]
    fn discovery_key_needs_a_following_segment() {
        let url = Url::parse("https://feeder.co/discover/").unwrap();
        assert_eq!(discovery_key(&url), None);
        let url = Url::parse("https://feeder.co/discover/abc/rss").unwrap();
        assert_eq!(discovery_key(&url).as_deref(), Some("abc"));
    }
}
