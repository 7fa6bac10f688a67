//! PostgreSQL repository implementations.

pub mod pg_analytics_repository;
pub mod pg_link_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_link_repository::PgLinkRepository;
