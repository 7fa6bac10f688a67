//! Target URL validation and normalization.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates and normalizes a target URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. Only absolute HTTP/HTTPS URLs are accepted (rejects `javascript:`,
///    `data:`, `file:` and relative inputs)
/// 2. Hostname is lowercased
/// 3. Default ports are removed (80 for HTTP, 443 for HTTPS)
/// 4. Path, query, and fragment are preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    // Url::parse already lowercases registered domain names, but not every
    // host representation; normalize explicitly.
    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase))
            .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
    }

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        // Cannot fail for http(s) URLs.
        let _ = url.set_port(None);
    }

    Ok(url.to_string())
}
