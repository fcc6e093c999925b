// HTTP request handlers
use crate::application::plan_service::DEFAULT_SITUATION;
use crate::domain::campus::{self, BuildingStats, LeaderboardEntry};
use crate::domain::dashboard::ChannelView;
use crate::domain::insight::Insight;
use crate::domain::telemetry::{ForecastPoint, Sample, Window, WindowSummary};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryView {
    pub generation: u64,
    /// RFC 3339 instant of the newest sample
    pub updated_at: Option<String>,
    pub samples: Vec<Sample>,
}

impl TelemetryView {
    fn from_window(window: &Window) -> Self {
        Self {
            generation: window.generation(),
            updated_at: window.latest().map(|s| s.recorded_at.to_rfc3339()),
            samples: window.to_vec(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    pub situation: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current rolling window
pub async fn get_telemetry(State(state): State<Arc<AppState>>) -> Json<TelemetryView> {
    Json(TelemetryView::from_window(&state.coordinator.window_snapshot()))
}

/// Live window updates, one `window` event per tick
pub async fn stream_telemetry(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.coordinator.subscribe();

    let stream = async_stream::stream! {
        while rx.changed().await.is_ok() {
            let view = {
                let window = rx.borrow_and_update();
                TelemetryView::from_window(&window)
            };

            match Event::default().event("window").json_data(&view) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => tracing::warn!("Failed to encode telemetry event: {}", e),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<WindowSummary> {
    Json(state.coordinator.window_snapshot().summary())
}

pub async fn get_forecast(State(state): State<Arc<AppState>>) -> Json<Vec<ForecastPoint>> {
    Json(state.coordinator.forecast().await)
}

pub async fn get_insights(State(state): State<Arc<AppState>>) -> Json<ChannelView<Vec<Insight>>> {
    Json(state.coordinator.insights_view())
}

/// Request fresh insights and answer once they settle
pub async fn refresh_insights(
    State(state): State<Arc<AppState>>,
) -> Json<ChannelView<Vec<Insight>>> {
    Json(state.coordinator.refresh_insights().await)
}

pub async fn get_plan(State(state): State<Arc<AppState>>) -> Json<ChannelView<String>> {
    Json(state.coordinator.plan_view())
}

/// Generate an optimization plan; the body is optional
pub async fn generate_plan(
    State(state): State<Arc<AppState>>,
    request: Option<Json<PlanRequest>>,
) -> Json<ChannelView<String>> {
    let Json(request) = request.unwrap_or_default();
    let situation = request
        .situation
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SITUATION.to_string());

    Json(state.coordinator.generate_plan(&situation).await)
}

pub async fn list_buildings() -> Json<Vec<BuildingStats>> {
    Json(campus::buildings())
}

pub async fn get_leaderboard() -> Json<Vec<LeaderboardEntry>> {
    Json(campus::leaderboard())
}
