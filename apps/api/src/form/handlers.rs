use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::form::completeness::CompletionSummary;
use crate::form::input::InputRecord;
use crate::form::schema::FieldSchema;
use crate::state::AppState;

/// GET /api/v1/form/schema
pub async fn handle_get_schema(State(state): State<AppState>) -> Json<FieldSchema> {
    Json(state.scorer.schema().clone())
}

/// POST /api/v1/form/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    payload: Result<Json<InputRecord>, JsonRejection>,
) -> Result<Json<CompletionSummary>, AppError> {
    let Json(record) = payload?;
    let unknown = state.scorer.unknown_fields(&record);
    if !unknown.is_empty() {
        warn!("Ignoring fields not in the form schema: {}", unknown.join(", "));
    }
    let summary = state.scorer.score(&record);
    debug!(
        "Form progress: {}% ({}/{} fields)",
        summary.overall_percentage, summary.filled_fields, summary.total_fields
    );
    Ok(Json(summary))
}
