/// Turns a raw href into the URL that gets fetched
///
/// An href that starts with `http` (so `https` too) is returned unchanged;
/// anything else is appended to `origin_prefix`. The href is not parsed,
/// trimmed or re-encoded.
///
/// # Examples
///
/// ```
/// use hop_crawler::url::normalize_href;
///
/// let origin = "https://pl.wikipedia.org";
/// assert_eq!(normalize_href(origin, "/wiki/Java"), "https://pl.wikipedia.org/wiki/Java");
/// assert_eq!(normalize_href(origin, "https://en.wikipedia.org/"), "https://en.wikipedia.org/");
/// ```
pub fn normalize_href(origin_prefix: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", origin_prefix, href)
    }
}
