//! Tile-load progress endpoints.
//!
//! The front end forwards its raster source's tile events here and polls
//! `/progress` (or uses the snapshot each event returns) for its progress bar.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::common::error_response;
use crate::error::GeoLegendError;
use crate::logging::generate_request_id;
use crate::progress::{LoadState, ProgressSnapshot};
use crate::state::{AppState, TileEvent};

/// Handle GET /progress requests
pub async fn progress_handler(State(state): State<Arc<AppState>>) -> Json<ProgressSnapshot> {
    Json(state.with_session(|s| s.progress()))
}

/// Handle POST /tiles/:event requests (`start`, `end` or `error`)
pub async fn tile_event_handler(
    State(state): State<Arc<AppState>>,
    Path(event): Path<String>,
) -> Response {
    let event = match event.as_str() {
        "start" => TileEvent::Start,
        "end" => TileEvent::End,
        "error" => TileEvent::Error,
        other => {
            let request_id = generate_request_id();
            return error_response(
                GeoLegendError::InvalidParameter {
                    param: "event".to_string(),
                    message: format!("Unknown tile event: {}. Must be start, end or error", other),
                },
                "/tiles",
                &request_id,
                Some(&format!("event={}", other)),
            );
        }
    };

    let snapshot = state.with_session(|s| s.record_tile_event(event));

    debug!(
        event = event.as_str(),
        tiles_total = snapshot.tiles_total,
        tiles_loaded = snapshot.tiles_loaded,
        "Tile event recorded"
    );
    if snapshot.state == LoadState::Complete && event != TileEvent::Start {
        info!(
            tiles_total = snapshot.tiles_total,
            "All started tiles finished"
        );
    }

    Json(snapshot).into_response()
}

/// Handle POST /source/reset requests
pub async fn reset_source_handler(State(state): State<Arc<AppState>>) -> Json<ProgressSnapshot> {
    Json(state.with_session(|s| {
        s.begin_source();
        s.progress()
    }))
}
