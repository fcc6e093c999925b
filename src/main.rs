// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::insight_service::InsightService;
use crate::application::plan_service::PlanService;
use crate::application::sample_generator::SampleGenerator;
use crate::application::telemetry_store::TelemetryStore;
use crate::application::view_coordinator::ViewCoordinator;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::gemini_client::GeminiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    if config.gemini.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; AI insight and plan requests will fail");
    }

    // Create model client (infrastructure layer)
    let model = Arc::new(GeminiClient::new(
        config.gemini.base_url.clone(),
        config.gemini.api_key.clone(),
        config.gemini.timeout(),
    )?);

    // Create services (application layer)
    let insight_service = InsightService::new(model.clone(), config.gemini.model.clone());
    let plan_service = PlanService::new(model, config.gemini.model.clone());
    let coordinator = ViewCoordinator::new(
        TelemetryStore::new(SampleGenerator::from_entropy()),
        insight_service,
        plan_service,
        config.telemetry.coordinator_settings(),
    );

    // Start telemetry tick and the startup insight request
    let mounted = coordinator.mount().await;

    let state = Arc::new(AppState { coordinator });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting campus-energy-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    mounted.teardown();
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
