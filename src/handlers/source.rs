//! Raster source description endpoint handler.
//!
//! The front end registers the projection and loads the GeoTIFF itself; this
//! only hands it what to load and how the projection is defined.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Response for GET /source
#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub url: Option<String>,
    pub projection: Option<String>,
    pub wkt: Option<String>,
    pub band: u32,
}

/// Handle GET /source requests
pub async fn source_handler(State(state): State<Arc<AppState>>) -> Json<SourceResponse> {
    let source = &state.config.source;
    Json(SourceResponse {
        url: source.url.clone(),
        projection: source.projection.clone(),
        wkt: state.wkt.clone(),
        band: state.config.legend.band,
    })
}
