//! Visit dimensions recorded alongside the click counter.

/// Classified attributes of a single counted visit.
///
/// Every field is independently optional: an absent value means that dimension
/// is simply not incremented for the visit, while the total still counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitDimensions {
    /// Country code from the configured geo header, passed through as-is.
    pub country: Option<String>,
    /// Coarse device class derived from the User-Agent.
    pub device: Option<String>,
    /// Host portion of the Referer header.
    pub referrer_host: Option<String>,
}

impl VisitDimensions {
    pub fn new(
        country: Option<String>,
        device: Option<String>,
        referrer_host: Option<String>,
    ) -> Self {
        Self {
            country,
            device,
            referrer_host,
        }
    }
}
