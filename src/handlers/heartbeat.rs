//! Heartbeat endpoint handler.
//!
//! Returns server status information: uptime, the current legend and the
//! tile-load progress.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;
use uuid::Uuid;

use crate::progress::ProgressSnapshot;
use crate::state::{AppState, LegendSummary};

/// Random ID generated once per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    pub legend: LegendSummary,
    pub progress: ProgressSnapshot,
    /// Server status
    pub status: String,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let timestamp = chrono::DateTime::<chrono::Utc>::from(SystemTime::now())
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let (legend, progress) = state.with_session(|s| (s.summary(), s.progress()));

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        legend,
        progress,
        status: "healthy".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_heartbeat_response_structure() {
        let state = AppState::new_shared(Config::default()).unwrap();

        let Json(response) = heartbeat_handler(State(state)).await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.server_id, *SERVER_ID);
        assert_eq!(response.legend.ramp, "viridis");
        assert_eq!(response.progress.percent, None);
        assert!(response.timestamp.ends_with('Z'));
    }
}
