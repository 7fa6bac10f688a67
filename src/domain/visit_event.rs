//! Visit event model for asynchronous accounting.

use crate::domain::entities::VisitDimensions;

/// An in-memory representation of a counted visit awaiting persistence.
///
/// Created by the redirect handler after bot filtering and sent over a bounded
/// channel to [`crate::domain::visit_worker::run_visit_worker`]. Decoupling the
/// HTTP response from the database writes keeps redirects fast and makes
/// accounting failures invisible to the visitor.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub link_id: i64,
    pub dims: VisitDimensions,
}

impl VisitEvent {
    pub fn new(link_id: i64, dims: VisitDimensions) -> Self {
        Self { link_id, dims }
    }
}
