//! Repository trait for aggregated visit analytics.

use crate::domain::entities::VisitDimensions;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface for per-day visit counters.
///
/// The core only ever writes analytics; reads belong to reporting surfaces
/// outside this crate.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Upserts the analytics row for `(link_id, day)` and applies one visit.
    ///
    /// Creates the row with `total_clicks = 1` on first visit; otherwise
    /// increments `total_clicks` and the map entry for each dimension value
    /// present in `dims`. The whole update is a single atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn upsert_increment(
        &self,
        link_id: i64,
        day: NaiveDate,
        dims: VisitDimensions,
    ) -> Result<(), AppError>;
}
