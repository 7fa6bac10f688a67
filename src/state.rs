//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;
use crate::domain::visit_event::VisitEvent;

/// Application state shared across all request handlers.
///
/// Built once at startup (or per test) and cloned cheaply per request; all
/// fields are handles. The store client lives inside the repositories and is
/// constructed exactly once, never as ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    /// Used by the health endpoint to probe store connectivity.
    pub link_repository: Arc<dyn LinkRepository>,
    pub visit_sender: mpsc::Sender<VisitEvent>,
    /// Request header carrying the visitor country code, provider-specific.
    pub geo_country_header: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        redirect_service: Arc<RedirectService>,
        link_repository: Arc<dyn LinkRepository>,
        visit_sender: mpsc::Sender<VisitEvent>,
        geo_country_header: String,
    ) -> Self {
        Self {
            link_service,
            redirect_service,
            link_repository,
            visit_sender,
            geo_country_header,
        }
    }
}
