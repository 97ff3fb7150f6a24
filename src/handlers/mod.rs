//! HTTP request handlers for the geolegend API.
//!
//! This module contains all the endpoint handlers and the router tying them
//! together.

pub mod common;
pub mod heartbeat;
pub mod legend;
pub mod progress;
pub mod ramps;
pub mod range;
pub mod source;
pub mod style;

pub use heartbeat::heartbeat_handler;
pub use legend::legend_handler;
pub use progress::{progress_handler, reset_source_handler, tile_event_handler};
pub use ramps::{ramps_handler, select_ramp_handler};
pub use range::{edit_range_handler, range_handler, statistics_handler};
pub use source::source_handler;
pub use style::style_handler;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the application router.
///
/// Paths the API does not handle fall through to the configured static
/// directory. Every response is CORS-permissive and marked uncacheable.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/heartbeat", get(heartbeat_handler))
        .route("/ramps", get(ramps_handler))
        .route("/ramp", put(select_ramp_handler))
        .route("/range", get(range_handler).put(edit_range_handler))
        .route("/statistics", post(statistics_handler))
        .route("/legend", get(legend_handler))
        .route("/style", get(style_handler))
        .route("/progress", get(progress_handler))
        .route("/tiles/:event", post(tile_event_handler))
        .route("/source", get(source_handler))
        .route("/source/reset", post(reset_source_handler));

    if let Some(dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    ))
    .layer(CorsLayer::permissive())
    .layer(create_http_trace_layer())
    .with_state(state)
}
