//! Application services.

pub mod link_service;
pub mod redirect_service;
pub mod visit_service;

pub use link_service::{CreateLink, LinkService};
pub use redirect_service::{RedirectService, Resolution};
pub use visit_service::VisitService;
