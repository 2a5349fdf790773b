use std::sync::Arc;

use crate::matching::orchestrator::MatchOrchestrator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Chooses remote or local scoring per batch and persists results.
    pub orchestrator: Arc<MatchOrchestrator>,
}
