//! Referrer host extraction.

use url::Url;

/// Extracts the host portion of a `Referer` header value.
///
/// Only the host is kept for analytics; path and query often carry tracking
/// or personal data. Malformed or host-less referrers yield `None`.
///
/// # Examples
///
/// ```
/// use hoplink::utils::referrer::referrer_host;
///
/// assert_eq!(
///     referrer_host(Some("https://news.ycombinator.com/item?id=1")),
///     Some("news.ycombinator.com".to_string())
/// );
/// assert_eq!(referrer_host(Some("android-app://com.slack")), Some("com.slack".to_string()));
/// assert_eq!(referrer_host(None), None);
/// ```
pub fn referrer_host(referer: Option<&str>) -> Option<String> {
    let url = Url::parse(referer?).ok()?;
    url.host_str().map(|h| h.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_host_from_full_url() {
        assert_eq!(
            referrer_host(Some("https://google.com/search?q=short+links")),
            Some("google.com".to_string())
        );
    }

    #[test]
    fn test_strips_port() {
        assert_eq!(
            referrer_host(Some("http://localhost:8080/page")),
            Some("localhost".to_string())
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(referrer_host(None), None);
    }

    #[test]
    fn test_malformed_referrer() {
        assert_eq!(referrer_host(Some("not a url")), None);
    }

    #[test]
    fn test_hostless_referrer() {
        assert_eq!(referrer_host(Some("about:blank")), None);
    }
}
