//! Visit recording service: click counter plus dimension analytics.

use std::sync::Arc;

use chrono::Utc;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::warn;

use crate::domain::entities::VisitDimensions;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::error::AppError;

/// Delay between click-increment retry attempts.
const RETRY_INTERVAL_MS: u64 = 100;

/// Additional attempts after the first failed click increment.
const RETRY_COUNT: usize = 2;

/// Service applying one visit to the store.
///
/// The click counter is the load-bearing metric and is retried; dimension
/// analytics are best-effort secondary data whose failure is logged and
/// swallowed. Both operations rely on store-native atomic primitives, so
/// concurrent visits to the same link never lose an increment.
pub struct VisitService {
    link_repository: Arc<dyn LinkRepository>,
    analytics_repository: Arc<dyn AnalyticsRepository>,
}

impl VisitService {
    /// Creates a new visit service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
    ) -> Self {
        Self {
            link_repository,
            analytics_repository,
        }
    }

    /// Records one visit: increments the click counter, then upserts the
    /// per-day analytics row for the current UTC day.
    ///
    /// # Errors
    ///
    /// Returns an error only when the click increment fails after retries.
    /// An analytics failure never propagates; the visit is still considered
    /// recorded with an undercounted dimension row.
    pub async fn record_visit(
        &self,
        link_id: i64,
        dims: VisitDimensions,
    ) -> Result<(), AppError> {
        let strategy = FixedInterval::from_millis(RETRY_INTERVAL_MS).take(RETRY_COUNT);
        Retry::spawn(strategy, || self.link_repository.increment_clicks(link_id)).await?;

        let day = Utc::now().date_naive();
        if let Err(e) = self
            .analytics_repository
            .upsert_increment(link_id, day, dims)
            .await
        {
            warn!("Analytics update for link {} failed: {}", link_id, e);
        }

        Ok(())
    }
}
