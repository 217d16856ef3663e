use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use jiff::Timestamp;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        timestamp: Timestamp::now(),
    })
}
