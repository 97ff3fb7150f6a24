//! Helpers shared by the endpoint handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::GeoLegendError;
use crate::logging::log_request_error;

/// HTTP status for an error surfaced by a handler
pub fn status_for(error: &GeoLegendError) -> StatusCode {
    match error {
        GeoLegendError::UnknownRamp { .. } => StatusCode::NOT_FOUND,
        GeoLegendError::InvalidParameter { .. } | GeoLegendError::InvalidRamp { .. } => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log `error` and turn it into a JSON error body
pub fn error_response(
    error: GeoLegendError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        status_for(&error),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}

/// JSON error body for a request whose body or query failed to deserialize
pub fn rejection_response(
    param: &str,
    rejection_text: String,
    endpoint: &str,
    request_id: &str,
) -> Response {
    error_response(
        GeoLegendError::InvalidParameter {
            param: param.to_string(),
            message: rejection_text,
        },
        endpoint,
        request_id,
        None,
    )
}
