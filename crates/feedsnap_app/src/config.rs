/// Environment variable holding a comma-separated list of feed URLs.
pub const URLS_ENV: &str = "FEED_URLS";
/// Environment variable holding a single feed URL.
pub const URL_ENV: &str = "FEED_URL";

/// Input URLs from the command-line argument, else `FEED_URLS`, else
/// `FEED_URL`. The first non-blank source wins; it is split on commas.
pub fn input_urls(arg: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let raw = arg
        .map(ToOwned::to_owned)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env(URLS_ENV).filter(|value| !value.trim().is_empty()))
        .or_else(|| env(URL_ENV).filter(|value| !value.trim().is_empty()));

    raw.as_deref().map(split_urls).unwrap_or_default()
}

fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
