//! Tile-load progress tracking.
//!
//! A raster source reports three kinds of per-tile events: a tile started
//! loading, finished loading, or failed. [`TileLoadTracker`] counts them and
//! derives a completion percentage for a progress indicator. A failed tile is
//! a finished tile as far as progress is concerned, so a session in which
//! every tile fails still ends at 100%.

use serde::Serialize;
use std::time::Duration;

/// Default delay before the host hides its progress indicator
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(600);

/// Observer of tile-load events emitted by a raster source
pub trait TileLoadListener {
    /// A tile started loading
    fn on_load_start(&mut self);

    /// A tile finished loading
    fn on_load_end(&mut self);

    /// A tile failed to load
    fn on_load_error(&mut self);
}

/// Lifecycle of one raster-loading session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No tile has started yet
    Idle,
    /// Some started tiles have not finished
    Loading,
    /// Every started tile has finished
    Complete,
}

/// Point-in-time view of the tracker, ready to hand to a progress indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub tiles_total: u64,
    pub tiles_loaded: u64,
    pub percent: Option<u8>,
    pub state: LoadState,
    /// Text for the indicator label, absent while idle
    pub text: Option<String>,
    /// Set once loading completes: the host hides its indicator after this delay
    pub hide_after_ms: Option<u64>,
}

/// Counter-based progress state machine
#[derive(Debug, Clone)]
pub struct TileLoadTracker {
    tiles_total: u64,
    tiles_loaded: u64,
    tiles_failed: u64,
    hide_delay: Duration,
}

impl TileLoadTracker {
    pub fn new() -> Self {
        Self::with_hide_delay(DEFAULT_HIDE_DELAY)
    }

    pub fn with_hide_delay(hide_delay: Duration) -> Self {
        Self {
            tiles_total: 0,
            tiles_loaded: 0,
            tiles_failed: 0,
            hide_delay,
        }
    }

    /// Start a new session: both counters go back to zero
    pub fn reset(&mut self) {
        self.tiles_total = 0;
        self.tiles_loaded = 0;
        self.tiles_failed = 0;
    }

    pub fn tiles_total(&self) -> u64 {
        self.tiles_total
    }

    /// Finished tiles, failures included
    pub fn tiles_loaded(&self) -> u64 {
        self.tiles_loaded
    }

    /// Failed tiles; already part of [`tiles_loaded`](Self::tiles_loaded)
    pub fn tiles_failed(&self) -> u64 {
        self.tiles_failed
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    pub fn state(&self) -> LoadState {
        if self.tiles_total == 0 {
            LoadState::Idle
        } else if self.tiles_loaded < self.tiles_total {
            LoadState::Loading
        } else {
            LoadState::Complete
        }
    }

    /// `round(100 * loaded / total)` clamped to 100, or `None` while idle
    pub fn progress_percent(&self) -> Option<u8> {
        if self.tiles_total == 0 {
            return None;
        }
        let percent = (self.tiles_loaded as f64 / self.tiles_total as f64 * 100.0).round();
        Some(percent.min(100.0) as u8)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let percent = self.progress_percent();
        let state = self.state();
        ProgressSnapshot {
            tiles_total: self.tiles_total,
            tiles_loaded: self.tiles_loaded,
            percent,
            state,
            text: percent.map(|p| format!("Loading GeoTIFF: {}%", p)),
            hide_after_ms: (state == LoadState::Complete)
                .then(|| self.hide_delay.as_millis() as u64),
        }
    }
}

impl Default for TileLoadTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TileLoadListener for TileLoadTracker {
    fn on_load_start(&mut self) {
        self.tiles_total = self.tiles_total.saturating_add(1);
    }

    fn on_load_end(&mut self) {
        self.tiles_loaded = self.tiles_loaded.saturating_add(1);
    }

    fn on_load_error(&mut self) {
        self.tiles_loaded = self.tiles_loaded.saturating_add(1);
        self.tiles_failed = self.tiles_failed.saturating_add(1);
    }
}
