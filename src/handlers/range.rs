//! Legend range endpoints: user edits and band statistics.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::common::rejection_response;
use crate::legend::BandStatistics;
use crate::logging::generate_request_id;
use crate::state::{AppState, LegendSummary};

/// Body of PUT /range; either bound may be omitted
#[derive(Debug, Default, Deserialize)]
pub struct RangeEdit {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Handle GET /range requests
pub async fn range_handler(State(state): State<Arc<AppState>>) -> Json<LegendSummary> {
    Json(state.with_session(|s| s.summary()))
}

/// Handle PUT /range requests.
///
/// The minimum is applied before the maximum, each nudged against the other
/// bound as it stands at that moment.
pub async fn edit_range_handler(
    State(state): State<Arc<AppState>>,
    edit: Result<Json<RangeEdit>, JsonRejection>,
) -> Response {
    let request_id = generate_request_id();
    let Json(edit) = match edit {
        Ok(edit) => edit,
        Err(rejection) => {
            return rejection_response("body", rejection.body_text(), "/range", &request_id)
        }
    };

    debug!(
        endpoint = "/range",
        request_id = %request_id,
        min = ?edit.min,
        max = ?edit.max,
        "Processing range edit"
    );

    Json(state.with_session(|s| {
        if let Some(min) = edit.min {
            s.set_min(min);
        }
        if let Some(max) = edit.max {
            s.set_max(max);
        }
        s.summary()
    }))
    .into_response()
}

/// Handle POST /statistics requests
pub async fn statistics_handler(
    State(state): State<Arc<AppState>>,
    stats: Result<Json<BandStatistics>, JsonRejection>,
) -> Response {
    let request_id = generate_request_id();
    let Json(stats) = match stats {
        Ok(stats) => stats,
        Err(rejection) => {
            return rejection_response("body", rejection.body_text(), "/statistics", &request_id)
        }
    };

    Json(state.with_session(|s| {
        s.apply_statistics(&stats);
        s.summary()
    }))
    .into_response()
}
