//! PostgreSQL implementation of the analytics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::VisitDimensions;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-day visit counters.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// One-statement upsert for the `(link_id, day)` row.
///
/// Row creation and every counter increment happen inside a single
/// `INSERT ... ON CONFLICT DO UPDATE`, so concurrent visits serialize at the
/// row without an application-level read. A NULL dimension parameter leaves
/// its map untouched while `total_clicks` still advances.
const UPSERT_SQL: &str = r#"
INSERT INTO link_analytics (link_id, day, total_clicks, countries, devices, referrers)
VALUES (
    $1, $2, 1,
    CASE WHEN $3::text IS NULL THEN '{}'::jsonb ELSE jsonb_build_object($3::text, 1) END,
    CASE WHEN $4::text IS NULL THEN '{}'::jsonb ELSE jsonb_build_object($4::text, 1) END,
    CASE WHEN $5::text IS NULL THEN '{}'::jsonb ELSE jsonb_build_object($5::text, 1) END
)
ON CONFLICT (link_id, day) DO UPDATE SET
    total_clicks = link_analytics.total_clicks + 1,
    countries = CASE WHEN $3::text IS NULL THEN link_analytics.countries
        ELSE jsonb_set(
            link_analytics.countries,
            ARRAY[$3::text],
            to_jsonb(COALESCE((link_analytics.countries ->> $3::text)::bigint, 0) + 1)
        ) END,
    devices = CASE WHEN $4::text IS NULL THEN link_analytics.devices
        ELSE jsonb_set(
            link_analytics.devices,
            ARRAY[$4::text],
            to_jsonb(COALESCE((link_analytics.devices ->> $4::text)::bigint, 0) + 1)
        ) END,
    referrers = CASE WHEN $5::text IS NULL THEN link_analytics.referrers
        ELSE jsonb_set(
            link_analytics.referrers,
            ARRAY[$5::text],
            to_jsonb(COALESCE((link_analytics.referrers ->> $5::text)::bigint, 0) + 1)
        ) END
"#;

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn upsert_increment(
        &self,
        link_id: i64,
        day: NaiveDate,
        dims: VisitDimensions,
    ) -> Result<(), AppError> {
        sqlx::query(UPSERT_SQL)
            .bind(link_id)
            .bind(day)
            .bind(&dims.country)
            .bind(&dims.device)
            .bind(&dims.referrer_host)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
