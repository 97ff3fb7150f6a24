//! Color ramp trait and utilities.
//!
//! This module defines the common interface for all color ramps and the
//! registry used to look them up by name.

use crate::error::{GeoLegendError, Result};

/// Color painted for samples that carry no data (fully transparent white)
pub const NO_DATA: [u8; 4] = [255, 255, 255, 0];

/// Names accepted by [`get_colormap`], in display order
const COLORMAP_NAMES: &[&str] = &[
    "viridis", "magma", "coolwarm", "terrain", "linear", "tricolor", "spectrum",
];

/// Trait for color mapping implementations
pub trait ColorRamp: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color.
    ///
    /// Values below 0 map to the first color and values above 1 to the last.
    /// NaN maps to [`NO_DATA`].
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        if value.is_nan() {
            return NO_DATA;
        }
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0) as f32
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this ramp
    fn name(&self) -> &str;
}

/// Get a color ramp by name (case-insensitive)
pub fn get_colormap(name: &str) -> Result<Box<dyn ColorRamp>> {
    use super::{named::*, stops::StopRamp};

    match name.to_lowercase().as_str() {
        "viridis" => Ok(Box::new(Viridis)),
        "magma" => Ok(Box::new(Magma)),
        "coolwarm" => Ok(Box::new(Coolwarm)),
        "terrain" => Ok(Box::new(Terrain)),
        "linear" => Ok(Box::new(StopRamp::linear())),
        "tricolor" => Ok(Box::new(StopRamp::tricolor())),
        "spectrum" => Ok(Box::new(StopRamp::spectrum())),
        _ => Err(GeoLegendError::UnknownRamp {
            name: name.to_string(),
        }),
    }
}

/// Names of every registered ramp
pub fn available_colormaps() -> &'static [&'static str] {
    COLORMAP_NAMES
}

/// Clamp a normalized input into [0, 1], or `None` for NaN
pub(crate) fn clamp_unit(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// Round a channel value to the nearest byte
pub(crate) fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Linear interpolation between two colors, rounded to the nearest byte
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    let lerp = |a: u8, b: u8| to_channel(a as f32 + (b as f32 - a as f32) * t);
    [lerp(c1[0], c2[0]), lerp(c1[1], c2[1]), lerp(c1[2], c2[2])]
}
