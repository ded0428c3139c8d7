use crate::api::AppState;
use crate::store::BandStore;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store_connected: bool,
    uptime_seconds: u64,
}

pub async fn health_check<S: BandStore>(
    State(state): State<AppState<S>>,
) -> Json<HealthResponse> {
    // Probe the store connection
    let store_connected = state.service.ping().await.is_ok();

    Json(HealthResponse {
        status: if store_connected {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        store_connected,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
