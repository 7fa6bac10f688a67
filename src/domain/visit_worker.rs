//! Background worker draining the visit event queue.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::mpsc;
use tracing::warn;

use crate::application::services::VisitService;
use crate::domain::visit_event::VisitEvent;

/// Consumes visit events and applies them through [`VisitService`].
///
/// Each event is processed under a bounded timeout so a slow or unavailable
/// store cannot wedge the queue. Failures are logged and counted; they never
/// propagate anywhere a visitor could observe them.
///
/// The loop ends when all senders are dropped, which is how tests and
/// shutdown paths terminate the worker.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    visit_service: Arc<VisitService>,
    timeout: Duration,
) {
    while let Some(event) = rx.recv().await {
        let recording = visit_service.record_visit(event.link_id, event.dims);

        match tokio::time::timeout(timeout, recording).await {
            Ok(Ok(())) => {
                counter!("hoplink_visits_recorded_total").increment(1);
            }
            Ok(Err(e)) => {
                counter!("hoplink_visits_failed_total").increment(1);
                warn!("Failed to record visit for link {}: {}", event.link_id, e);
            }
            Err(_) => {
                counter!("hoplink_visits_failed_total").increment(1);
                warn!(
                    "Visit recording for link {} timed out after {:?}",
                    event.link_id, timeout
                );
            }
        }
    }
}
