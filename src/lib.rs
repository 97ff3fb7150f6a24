//! # geolegend
//!
//! Color ramps, legend rendering and tile-load progress for GeoTIFF map overlays.
//!
//! A map front end does the heavy lifting (decoding the GeoTIFF, reprojecting
//! it, drawing tiles). This crate owns the small amount of state around it:
//!
//! - **Color ramps**: named palettes and stop-based ramps mapping [0, 1] to RGBA
//! - **Legend**: the data range shown on the legend and the gradient bitmap
//! - **Style**: the band-interpolation expression keeping the map in step with the legend
//! - **Progress**: a tile-load counter driving a progress bar
//!
//! The server binary exposes all of this over HTTP and can serve the front
//! end's files alongside.

pub mod colormaps;
pub mod config;
pub mod error;
pub mod handlers;
pub mod legend;
pub mod logging;
pub mod progress;
pub mod state;
pub mod style;

pub use colormaps::{get_colormap, ColorRamp, StopRamp};
pub use config::Config;
pub use error::{GeoLegendError, Result};
pub use legend::{render_legend, BandStatistics, LegendRange};
pub use logging::init_tracing;
pub use progress::{LoadState, ProgressSnapshot, TileLoadListener, TileLoadTracker};
pub use state::{AppState, LegendSession, TileEvent};
pub use style::StyleExpression;
