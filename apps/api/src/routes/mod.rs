pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::economics::handlers as economics;
use crate::errors::AppError;
use crate::form::handlers as form;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form progress
        .route("/api/v1/form/schema", get(form::handle_get_schema))
        .route("/api/v1/form/progress", post(form::handle_progress))
        // Calculator
        .route(
            "/api/v1/economics/calculate",
            post(economics::handle_calculate),
        )
        .route(
            "/api/v1/economics/validate",
            post(economics::handle_validate),
        )
        .fallback(not_found)
        .with_state(state)
}
