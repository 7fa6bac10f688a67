//! User-Agent classification: bot filtering and coarse device buckets.

/// Case-insensitive markers identifying crawlers, monitoring probes, and
/// social-media link-unfurling agents.
const BOT_MARKERS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "slurp",
    "search",
    "mediapartners",
    "nagios",
    "monitoring",
    "whatsapp",
    "facebook",
    "twitter",
    "linkedin",
    "telegram",
    "discord",
    "slack",
    "google",
    "bing",
    "yandex",
    "duckduckgo",
    "baidu",
];

/// Returns true when the User-Agent matches a known bot marker.
///
/// A missing User-Agent is treated as a regular visitor: plenty of privacy
/// tooling strips the header, and diverting those users would break real
/// traffic.
pub fn is_bot(user_agent: Option<&str>) -> bool {
    let Some(ua) = user_agent else {
        return false;
    };

    let ua = ua.to_ascii_lowercase();
    BOT_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Buckets a User-Agent into a coarse device class.
///
/// Returns `None` when the header is absent; that visit still counts but the
/// device dimension is left untouched.
pub fn classify_device(user_agent: Option<&str>) -> Option<&'static str> {
    let ua = user_agent?.to_ascii_lowercase();

    if ua.contains("ipad") || ua.contains("tablet") {
        Some("tablet")
    } else if ua.contains("mobi") || ua.contains("android") || ua.contains("iphone") {
        Some("mobile")
    } else {
        Some("desktop")
    }
}
