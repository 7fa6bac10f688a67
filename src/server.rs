//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, worker spawning, and the Axum
//! server lifecycle.

use crate::application::services::{LinkService, RedirectService, VisitService};
use crate::config::Config;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::persistence::{PgAnalyticsRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Background visit worker
/// - Axum HTTP server with graceful shutdown on ctrl-c
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let analytics_repository: Arc<dyn AnalyticsRepository> =
        Arc::new(PgAnalyticsRepository::new(pool.clone()));

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let visit_service = Arc::new(VisitService::new(
        link_repository.clone(),
        analytics_repository,
    ));
    tokio::spawn(run_visit_worker(
        visit_rx,
        visit_service,
        Duration::from_millis(config.analytics_timeout_ms),
    ));
    tracing::info!("Visit worker started");

    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        config.base_url.clone(),
        config.slug_max_attempts,
    ));
    let redirect_service = Arc::new(RedirectService::new(
        link_repository.clone(),
        config.bot_policy,
        config.landing_url.clone(),
    ));

    let state = AppState::new(
        link_service,
        redirect_service,
        link_repository,
        visit_tx,
        config.geo_country_header.clone(),
    );

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on http://{}", config.listen_addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
