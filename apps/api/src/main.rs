mod config;
mod errors;
mod extraction;
mod profiles;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use axum::{body::Body, http::Request};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::profiles::ProfileRegistry;
use crate::routes::build_router;
use crate::scoring::HeuristicScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Profiles are loaded once and shared read-only
    let profiles = Arc::new(ProfileRegistry::load(config.profiles_path.as_deref())?);
    info!(
        "Job profiles ready: {} (default: {})",
        profiles.len(),
        profiles.default_profile().name
    );

    let scorer = Arc::new(HeuristicScorer::new(profiles.clone(), config.scoring.clone()));
    info!(
        "Scorer initialized (normalization: {:?}, bounds: {:?}, fuzzy: {:?})",
        config.scoring.normalization, config.scoring.bounds, config.scoring.fuzzy_threshold
    );

    let state = AppState {
        config: config.clone(),
        profiles,
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri()
            )
        }))
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
