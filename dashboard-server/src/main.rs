//! Accident Severity Dashboard Server
//!
//! Serves the dashboard panels, the pre-rendered charts and the prediction
//! simulator backed by `severity-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SEVERITY DASHBOARD                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Panels   │  │  Charts   │  │  Prediction Simulator   │ │
//! │  │  (JSON)   │  │  (PNG)    │  │  (severity-core)        │ │
//! │  └───────────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │                       ▼                      ▼              │
//! │                ┌─────────────┐       ┌─────────────┐       │
//! │                │ CHARTS_DIR  │       │ARTIFACTS_DIR│       │
//! │                └─────────────┘       └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use severity_core::ModelState;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
    services::ServeDir,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "severity_dashboard=info,severity_core=info,tower_http=info"
    } else {
        "severity_dashboard=debug,severity_core=debug,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Severity Dashboard starting ({})...", config.environment);
    tracing::info!("Artifacts: {}", config.artifacts_dir.display());
    tracing::info!("Charts: {}", config.charts_dir.display());

    // Load model artifacts once; failure leaves the dashboard up
    let model = ModelState::load(&config.artifact_config()).shared();
    if model.is_ready() {
        tracing::info!("Model loaded, prediction simulator enabled");
    } else {
        tracing::warn!("Model unavailable, prediction simulator disabled");
    }

    // Build application state
    let state = AppState {
        model,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelState>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/sections", get(handlers::content::sections))
        .route("/api/v1/charts", get(handlers::content::charts))
        .route("/api/v1/form", get(handlers::content::form))
        .route("/api/v1/predict", post(handlers::predict::predict));

    Router::new()
        .merge(api_routes)
        .nest_service("/charts", ServeDir::new(&state.config.charts_dir))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
