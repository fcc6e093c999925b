// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    generate_plan, get_forecast, get_insights, get_leaderboard, get_plan, get_summary,
    get_telemetry, health_check, list_buildings, refresh_insights, stream_telemetry,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/telemetry", get(get_telemetry))
        .route("/telemetry/stream", get(stream_telemetry))
        .route("/telemetry/summary", get(get_summary))
        .route("/telemetry/forecast", get(get_forecast))
        .route("/insights", get(get_insights))
        .route("/insights/refresh", post(refresh_insights))
        .route("/plan", get(get_plan).post(generate_plan))
        .route("/buildings", get(list_buildings))
        .route("/leaderboard", get(get_leaderboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
