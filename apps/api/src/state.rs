use std::sync::Arc;

use crate::form::completeness::FormCompletionScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup from the active schema; scoring is read-only.
    pub scorer: Arc<FormCompletionScorer>,
}

impl AppState {
    pub fn new(scorer: FormCompletionScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}
