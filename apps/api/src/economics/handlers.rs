//! Axum route handlers for the calculator.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::economics::calculator::compute_unit_economics;
use crate::economics::models::{UnitEconomicsInput, UnitEconomicsResult};
use crate::economics::validation::{validate_input, ValidationReport};
use crate::errors::AppError;
use crate::form::completeness::CompletionSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: UnitEconomicsResult,
    pub validation: ValidationReport,
    pub progress: CompletionSummary,
}

/// POST /api/v1/economics/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    payload: Result<Json<UnitEconomicsInput>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(input) = payload?;
    let validation = validate_input(&input);
    if !validation.passed {
        warn!(
            "Rejected calculation: {} invalid field(s)",
            validation.errors().count()
        );
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&validation).unwrap_or_default(),
        ));
    }

    let result = compute_unit_economics(&input);
    let progress = state.scorer.score(&input.to_record());
    debug!(
        "Calculated unit economics: net_profit={} margin={:?}",
        result.net_profit, result.margin_percent
    );

    Ok(Json(CalculateResponse {
        result,
        validation,
        progress,
    }))
}

/// POST /api/v1/economics/validate
pub async fn handle_validate(
    payload: Result<Json<UnitEconomicsInput>, JsonRejection>,
) -> Result<Json<ValidationReport>, AppError> {
    let Json(input) = payload?;
    Ok(Json(validate_input(&input)))
}
