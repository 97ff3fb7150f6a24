//! Ramp listing and selection.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::common::{error_response, rejection_response};
use crate::colormaps::available_colormaps;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Response for GET /ramps
#[derive(Debug, Serialize, Deserialize)]
pub struct RampsResponse {
    pub available: Vec<String>,
    pub selected: String,
}

/// Body of PUT /ramp
#[derive(Debug, Deserialize)]
pub struct RampSelection {
    pub name: String,
}

/// Handle GET /ramps requests
pub async fn ramps_handler(State(state): State<Arc<AppState>>) -> Json<RampsResponse> {
    let selected = state.with_session(|s| s.ramp().name().to_string());
    Json(RampsResponse {
        available: available_colormaps().iter().map(|n| n.to_string()).collect(),
        selected,
    })
}

/// Handle PUT /ramp requests
pub async fn select_ramp_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RampSelection>, JsonRejection>,
) -> Response {
    let request_id = generate_request_id();
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return rejection_response("body", rejection.body_text(), "/ramp", &request_id)
        }
    };

    match state.with_session(|s| s.select_ramp(&body.name).map(|_| s.summary())) {
        Ok(summary) => {
            info!(
                endpoint = "/ramp",
                request_id = %request_id,
                ramp = %summary.ramp,
                "Legend ramp changed"
            );
            Json(summary).into_response()
        }
        Err(error) => error_response(
            error,
            "/ramp",
            &request_id,
            Some(&format!("name={}", body.name)),
        ),
    }
}
