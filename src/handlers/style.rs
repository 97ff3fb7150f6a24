//! Map style endpoint handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::common::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /style requests.
///
/// `color` is the renderer's array form, `expression` the typed form.
pub async fn style_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();

    match state.with_session(|s| s.style_expression()) {
        Ok(expression) => Json(json!({
            "color": expression.to_expression_value(),
            "expression": expression,
        }))
        .into_response(),
        Err(error) => error_response(error, "/style", &request_id, None),
    }
}
