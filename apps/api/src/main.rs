mod config;
mod economics;
mod errors;
mod form;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::form::completeness::FormCompletionScorer;
use crate::form::schema::FieldSchema;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Unitcalc API v{}", env!("CARGO_PKG_VERSION"));

    let schema = load_schema(&config)?;
    info!(
        "Form schema: {} sections, {} fields",
        schema.sections.len(),
        schema.total_fields()
    );

    let state = AppState::new(FormCompletionScorer::new(schema));

    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Uses the schema file from `FORM_SCHEMA_PATH` when set, else the built-in one.
fn load_schema(config: &Config) -> Result<FieldSchema> {
    match &config.form_schema_path {
        Some(path) => {
            info!("Loading form schema from {path}");
            FieldSchema::from_json_file(path)
                .with_context(|| format!("Invalid form schema at '{path}'"))
        }
        None => Ok(FieldSchema::marketplace()),
    }
}
