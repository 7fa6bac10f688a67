#![allow(dead_code)]

//! Shared test fixtures: an in-memory store and AppState construction.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tokio::sync::mpsc;

use hoplink::application::services::{LinkService, RedirectService, VisitService};
use hoplink::config::BotPolicy;
use hoplink::domain::entities::{Link, LinkMetadata, NewLink, VisitDimensions};
use hoplink::domain::repositories::{AnalyticsRepository, LinkRepository};
use hoplink::domain::visit_event::VisitEvent;
use hoplink::error::AppError;
use hoplink::state::AppState;

pub const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/122.0";
pub const BOT_UA: &str = "Googlebot/2.1 (+http://www.google.com/bot.html)";

/// Per-day analytics row as kept by the in-memory store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsRow {
    pub total_clicks: i64,
    pub countries: HashMap<String, i64>,
    pub devices: HashMap<String, i64>,
    pub referrers: HashMap<String, i64>,
}

/// In-memory store implementing both repository traits.
///
/// Mirrors the store-side guarantees the PostgreSQL repositories rely on:
/// unique-slug enforcement at insert and serialized counter updates.
#[derive(Default)]
pub struct InMemoryStore {
    links: Mutex<Vec<Link>>,
    analytics: Mutex<HashMap<(i64, NaiveDate), AnalyticsRow>>,
    next_id: AtomicI64,
    /// When set, analytics writes fail with an internal error.
    pub fail_analytics: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn click_count(&self, link_id: i64) -> i64 {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == link_id)
            .map(|l| l.click_count)
            .unwrap_or(0)
    }

    pub fn link_by_slug(&self, slug: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.slug == slug)
            .cloned()
    }

    pub fn total_links(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn analytics_row(&self, link_id: i64, day: NaiveDate) -> Option<AnalyticsRow> {
        self.analytics.lock().unwrap().get(&(link_id, day)).cloned()
    }

    pub fn total_analytics_rows(&self) -> usize {
        self.analytics.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.slug == new_link.slug) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_slug_key" }),
            ));
        }

        let now = Utc::now();
        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            slug: new_link.slug,
            target_url: new_link.target_url,
            owner_id: new_link.owner_id,
            metadata: new_link.metadata,
            click_count: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.slug == slug)
            .cloned())
    }

    async fn increment_clicks(&self, link_id: i64) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();

        let link = links.iter_mut().find(|l| l.id == link_id).ok_or_else(|| {
            AppError::not_found("Link no longer exists", json!({ "link_id": link_id }))
        })?;

        link.click_count += 1;
        link.updated_at = Utc::now();

        Ok(())
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn upsert_increment(
        &self,
        link_id: i64,
        day: NaiveDate,
        dims: VisitDimensions,
    ) -> Result<(), AppError> {
        if self.fail_analytics.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let mut analytics = self.analytics.lock().unwrap();
        let row = analytics.entry((link_id, day)).or_default();

        row.total_clicks += 1;
        if let Some(country) = dims.country {
            *row.countries.entry(country).or_insert(0) += 1;
        }
        if let Some(device) = dims.device {
            *row.devices.entry(device).or_insert(0) += 1;
        }
        if let Some(referrer) = dims.referrer_host {
            *row.referrers.entry(referrer).or_insert(0) += 1;
        }

        Ok(())
    }
}

/// Seeds a link directly into the store, bypassing the service layer.
pub async fn seed_link(store: &Arc<InMemoryStore>, slug: &str, url: &str) -> i64 {
    store
        .insert_unique(NewLink {
            slug: slug.to_string(),
            target_url: url.to_string(),
            owner_id: None,
            metadata: LinkMetadata::default(),
        })
        .await
        .unwrap()
        .id
}

/// Builds an AppState backed by the in-memory store.
///
/// Returns the receiving end of the visit channel so tests can inspect
/// queued events or feed them to a worker.
pub fn test_state(
    store: Arc<InMemoryStore>,
    bot_policy: BotPolicy,
) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let (visit_tx, visit_rx) = mpsc::channel(64);

    let link_repository: Arc<dyn LinkRepository> = store.clone();

    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        "https://sho.rt".to_string(),
        5,
    ));
    let redirect_service = Arc::new(RedirectService::new(
        link_repository.clone(),
        bot_policy,
        "https://sho.rt/".to_string(),
    ));

    let state = AppState::new(
        link_service,
        redirect_service,
        link_repository,
        visit_tx,
        "cf-ipcountry".to_string(),
    );

    (state, visit_rx)
}

/// Builds a VisitService over the same in-memory store.
pub fn visit_service(store: &Arc<InMemoryStore>) -> Arc<VisitService> {
    let links: Arc<dyn LinkRepository> = store.clone();
    let analytics: Arc<dyn AnalyticsRepository> = store.clone();
    Arc::new(VisitService::new(links, analytics))
}
