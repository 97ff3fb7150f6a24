//! Legend image endpoint handler.
//!
//! Returns a PNG of the legend gradient for the selected ramp, or for a ramp
//! named in the query without changing the selection.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::common::{error_response, rejection_response};
use crate::colormaps::get_colormap;
use crate::error::{GeoLegendError, Result};
use crate::legend::{encode_png, render_legend};
use crate::logging::{generate_request_id, log_timed_operation};
use crate::state::AppState;

/// Largest legend edge accepted, in pixels
const MAX_LEGEND_EDGE: u32 = 4096;

/// Query parameters for legend endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LegendQuery {
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// Ramp to draw instead of the selected one
    pub ramp: Option<String>,
}

/// Handle GET /legend requests
pub async fn legend_handler(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<LegendQuery>, QueryRejection>,
) -> Response {
    let request_id = generate_request_id();
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return rejection_response("query", rejection.body_text(), "/legend", &request_id)
        }
    };

    debug!(
        endpoint = "/legend",
        request_id = %request_id,
        width = ?params.width,
        height = ?params.height,
        ramp = ?params.ramp,
        "Processing legend request"
    );

    match render_legend_png(&state, &params) {
        Ok(png) => {
            info!(
                endpoint = "/legend",
                request_id = %request_id,
                bytes = png.len(),
                "Legend generated"
            );
            (
                [
                    (header::CONTENT_TYPE, "image/png"),
                    (header::CONTENT_DISPOSITION, "inline; filename=\"legend.png\""),
                ],
                Bytes::from(png),
            )
                .into_response()
        }
        Err(error) => error_response(
            error,
            "/legend",
            &request_id,
            Some(&format!(
                "width={:?}, height={:?}, ramp={:?}",
                params.width, params.height, params.ramp
            )),
        ),
    }
}

fn render_legend_png(state: &AppState, params: &LegendQuery) -> Result<Vec<u8>> {
    let width = params.width.unwrap_or(state.config.legend.width);
    let height = params.height.unwrap_or(state.config.legend.height);

    if width > MAX_LEGEND_EDGE || height > MAX_LEGEND_EDGE {
        return Err(GeoLegendError::InvalidParameter {
            param: if width > MAX_LEGEND_EDGE { "width" } else { "height" }.to_string(),
            message: format!("Legend edges are limited to {} pixels", MAX_LEGEND_EDGE),
        });
    }

    let img = match &params.ramp {
        Some(name) => {
            let ramp = get_colormap(name)?;
            log_timed_operation("render_legend", || render_legend(ramp.as_ref(), width, height))?
        }
        None => log_timed_operation("render_legend", || {
            state.with_session(|s| s.legend_image(width, height))
        })?,
    };

    encode_png(&img)
}
