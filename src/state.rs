//! Application state management for geolegend.
//!
//! [`LegendSession`] owns everything that changes while a raster is shown:
//! the selected ramp, the legend range, the style ramp and the tile-load
//! counters. [`AppState`] puts one session behind a mutex so handlers on
//! different tasks mutate it one at a time.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::colormaps::{get_colormap, ColorRamp, StopRamp};
use crate::config::{style_ramp_by_name, Config};
use crate::error::Result;
use crate::legend::{render_legend, BandStatistics, LegendRange};
use crate::progress::{ProgressSnapshot, TileLoadListener, TileLoadTracker};
use crate::style::StyleExpression;

/// Current legend configuration, as reported to the front end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSummary {
    pub ramp: String,
    pub min: f64,
    pub max: f64,
    pub label_min: i64,
    pub label_max: i64,
}

/// Explicit owned state of one displayed raster
pub struct LegendSession {
    ramp: Box<dyn ColorRamp>,
    range: LegendRange,
    style_ramp: StopRamp,
    band: u32,
    tracker: TileLoadTracker,
}

impl LegendSession {
    pub fn new(ramp: Box<dyn ColorRamp>, style_ramp: StopRamp, band: u32) -> Self {
        Self {
            ramp,
            range: LegendRange::default(),
            style_ramp,
            band,
            tracker: TileLoadTracker::new(),
        }
    }

    /// Build a session from the legend section of the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut session = Self::new(
            get_colormap(&config.legend.ramp)?,
            style_ramp_by_name(&config.legend.style_ramp)?,
            config.legend.band,
        );
        session.tracker =
            TileLoadTracker::with_hide_delay(Duration::from_millis(config.legend.hide_delay_ms));
        Ok(session)
    }

    pub fn ramp(&self) -> &dyn ColorRamp {
        self.ramp.as_ref()
    }

    pub fn range(&self) -> LegendRange {
        self.range
    }

    pub fn tracker(&self) -> &TileLoadTracker {
        &self.tracker
    }

    /// Switch the legend to the named ramp
    pub fn select_ramp(&mut self, name: &str) -> Result<()> {
        self.ramp = get_colormap(name)?;
        debug!(ramp = self.ramp.name(), "Legend ramp selected");
        Ok(())
    }

    /// User edit of the lower bound; returns the range actually stored
    pub fn set_min(&mut self, value: f64) -> LegendRange {
        if !self.range.set_min(value) {
            debug!(value = value, "Ignoring non-finite legend minimum");
        }
        self.range
    }

    /// User edit of the upper bound; returns the range actually stored
    pub fn set_max(&mut self, value: f64) -> LegendRange {
        if !self.range.set_max(value) {
            debug!(value = value, "Ignoring non-finite legend maximum");
        }
        self.range
    }

    /// Replace the range with freshly computed band statistics
    pub fn apply_statistics(&mut self, stats: &BandStatistics) -> LegendRange {
        self.range = LegendRange::from_statistics(stats);
        info!(
            operation = "apply_statistics",
            min = self.range.min(),
            max = self.range.max(),
            "Legend range updated from band statistics"
        );
        self.range
    }

    /// A new raster source begins loading
    pub fn begin_source(&mut self) {
        self.tracker.reset();
        info!(operation = "begin_source", "Tile counters reset");
    }

    /// Forward a tile event to the tracker and return the new progress
    pub fn record_tile_event(&mut self, event: TileEvent) -> ProgressSnapshot {
        match event {
            TileEvent::Start => self.tracker.on_load_start(),
            TileEvent::End => self.tracker.on_load_end(),
            TileEvent::Error => self.tracker.on_load_error(),
        }
        self.tracker.snapshot()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.tracker.snapshot()
    }

    /// Legend bitmap for the selected ramp
    pub fn legend_image(&self, width: u32, height: u32) -> Result<image::RgbaImage> {
        render_legend(self.ramp.as_ref(), width, height)
    }

    /// Style expression matching the current range
    pub fn style_expression(&self) -> Result<StyleExpression> {
        StyleExpression::from_ramp(self.band, &self.style_ramp, &self.range)
    }

    pub fn summary(&self) -> LegendSummary {
        let (label_min, label_max) = self.range.labels();
        LegendSummary {
            ramp: self.ramp.name().to_string(),
            min: self.range.min(),
            max: self.range.max(),
            label_min,
            label_max,
        }
    }
}

/// The three tile events a raster source emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    Start,
    End,
    Error,
}

impl TileEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileEvent::Start => "start",
            TileEvent::End => "end",
            TileEvent::Error => "error",
        }
    }
}

/// The main application state shared across all handlers
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Projection WKT read at startup
    pub wkt: Option<String>,
    /// When the server started
    pub started_at: Instant,
    session: Mutex<LegendSession>,
}

impl AppState {
    /// Create a new AppState from configuration
    pub fn new(config: Config) -> Result<Self> {
        let session = LegendSession::from_config(&config)?;
        let wkt = config.load_wkt()?;
        Ok(Self {
            config,
            wkt,
            started_at: Instant::now(),
            session: Mutex::new(session),
        })
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Run `f` with exclusive access to the session.
    ///
    /// The lock is released when `f` returns; never call this across an await.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut LegendSession) -> R) -> R {
        let mut session = self.session.lock();
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::LoadState;
    use pretty_assertions::assert_eq;

    fn session() -> LegendSession {
        LegendSession::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_session_defaults() {
        let session = session();
        assert_eq!(
            session.summary(),
            LegendSummary {
                ramp: "viridis".to_string(),
                min: 0.0,
                max: 255.0,
                label_min: 0,
                label_max: 255,
            }
        );
        assert_eq!(session.tracker().hide_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_select_ramp() {
        let mut session = session();
        session.select_ramp("Terrain").unwrap();
        assert_eq!(session.ramp().name(), "terrain");

        assert!(session.select_ramp("rainbow").is_err());
        assert_eq!(session.ramp().name(), "terrain");
    }

    #[test]
    fn test_range_edits_flow_into_style() {
        let mut session = session();
        session.apply_statistics(&BandStatistics {
            min: Some(10.0),
            max: Some(90.0),
        });
        let range = session.set_max(5.0);
        assert_eq!((range.min(), range.max()), (10.0, 11.0));

        let style = session.style_expression().unwrap();
        let values: Vec<f64> = style.stops().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![10.0, 11.0]);
    }

    #[test]
    fn test_tile_events_and_reset() {
        let mut session = session();
        session.record_tile_event(TileEvent::Start);
        session.record_tile_event(TileEvent::Start);
        session.record_tile_event(TileEvent::Error);
        let snapshot = session.record_tile_event(TileEvent::End);
        assert_eq!(snapshot.percent, Some(100));
        assert_eq!(snapshot.state, LoadState::Complete);

        session.begin_source();
        assert_eq!(session.progress().state, LoadState::Idle);
    }

    #[test]
    fn test_legend_image_follows_selected_ramp() {
        let mut session = session();
        session.select_ramp("linear").unwrap();
        let img = session.legend_image(10, 2).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(9, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_app_state_serializes_mutations() {
        let state = AppState::new_shared(Config::default()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        state.with_session(|s| s.record_tile_event(TileEvent::Start));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.with_session(|s| s.tracker().tiles_total()), 100);
    }
}
