//! Legend range handling and legend bitmap rendering.
//!
//! The legend is a horizontal gradient replicated on every row. The range
//! backing its end labels comes from band statistics and user edits; both
//! paths repair bad input instead of rejecting it.

use image::{ImageBuffer, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::colormaps::ColorRamp;
use crate::error::{GeoLegendError, Result};

/// Minimum used when band statistics carry no usable minimum
pub const DEFAULT_MIN: f64 = 0.0;

/// Maximum used when band statistics carry no usable maximum
pub const DEFAULT_MAX: f64 = 255.0;

/// Per-band sample statistics as reported by the raster source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// The (min, max) pair shown on the legend and used for the map style.
///
/// Always satisfies `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendRange {
    min: f64,
    max: f64,
}

impl LegendRange {
    /// Create a range, pushing `max` to `min + 1` when `max <= min`.
    ///
    /// Non-finite bounds are replaced with the defaults. At magnitudes where
    /// `+ 1` is lost to rounding the nudge is one representable step instead.
    pub fn new(min: f64, max: f64) -> Self {
        let mut min = if min.is_finite() { min } else { DEFAULT_MIN };
        let mut max = if max.is_finite() { max } else { DEFAULT_MAX };
        if max <= min {
            max = step_above(min);
            if !max.is_finite() {
                max = min;
                min = step_below(max);
            }
        }
        Self { min, max }
    }

    /// Range derived from band statistics, defaulting missing bounds to 0/255
    pub fn from_statistics(stats: &BandStatistics) -> Self {
        let min = stats.min.filter(|v| v.is_finite()).unwrap_or(DEFAULT_MIN);
        let max = stats.max.filter(|v| v.is_finite()).unwrap_or(DEFAULT_MAX);
        Self::new(min, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Apply a user edit to the minimum; `min >= max` is nudged to `max - 1`.
    ///
    /// Returns `false` when the value was not finite and was ignored.
    pub fn set_min(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.min = if value >= self.max { step_below(self.max) } else { value };
        true
    }

    /// Apply a user edit to the maximum; `max <= min` is nudged to `min + 1`.
    ///
    /// Returns `false` when the value was not finite and was ignored.
    pub fn set_max(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.max = if value <= self.min { step_above(self.min) } else { value };
        true
    }

    /// Legend end labels, rounded to the nearest integer
    pub fn labels(&self) -> (i64, i64) {
        (self.min.round() as i64, self.max.round() as i64)
    }

    /// Position of `value` within the range, clamped to [0, 1]
    pub fn normalize(&self, value: f64) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0) as f32
    }

    /// Data value at normalized position `t`
    pub fn value_at(&self, t: f32) -> f64 {
        self.min + t as f64 * (self.max - self.min)
    }
}

impl Default for LegendRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN, DEFAULT_MAX)
    }
}

/// `value + 1`, or the next representable value above when that rounds away
fn step_above(value: f64) -> f64 {
    let nudged = value + 1.0;
    if nudged > value {
        nudged
    } else {
        next_representable(value, true)
    }
}

/// `value - 1`, or the next representable value below when that rounds away
fn step_below(value: f64) -> f64 {
    let nudged = value - 1.0;
    if nudged < value {
        nudged
    } else {
        next_representable(value, false)
    }
}

/// Adjacent finite-or-infinite `f64` to a finite `value`
fn next_representable(value: f64, upward: bool) -> f64 {
    if value == 0.0 {
        let smallest = f64::from_bits(1);
        return if upward { smallest } else { -smallest };
    }
    let bits = value.to_bits();
    // Bit patterns grow away from zero for both signs
    if (value > 0.0) == upward {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Normalized sample position of column `x` in a legend `width` columns wide
fn column_position(x: u32, width: u32) -> f32 {
    if width <= 1 {
        0.0
    } else {
        x as f32 / (width - 1) as f32
    }
}

/// The color of every legend column, left to right
pub fn legend_column_colors(ramp: &dyn ColorRamp, width: u32) -> Vec<[u8; 4]> {
    (0..width)
        .map(|x| ramp.map_normalized(column_position(x, width)))
        .collect()
}

/// Rasterize a horizontal legend gradient of the given size
pub fn render_legend(ramp: &dyn ColorRamp, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(GeoLegendError::InvalidParameter {
            param: if width == 0 { "width" } else { "height" }.to_string(),
            message: format!("Legend dimensions must be non-zero, got {}x{}", width, height),
        });
    }

    let columns = legend_column_colors(ramp, width);
    Ok(ImageBuffer::from_fn(width, height, |x, _| {
        image::Rgba(columns[x as usize])
    }))
}

/// Encode a legend bitmap as PNG
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
