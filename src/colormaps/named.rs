//! Named palettes.
//!
//! Closed-form approximations of the usual scientific palettes. They are
//! cheap enough to evaluate per legend column without a lookup table.

use super::colormap::{clamp_unit, to_channel, ColorRamp, NO_DATA};

/// Viridis approximation - purple to yellow
pub struct Viridis;

impl ColorRamp for Viridis {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let Some(t) = clamp_unit(value) else {
            return NO_DATA;
        };
        [
            to_channel(68.0 + t * (253.0 - 68.0)),
            to_channel(1.0 + t * (231.0 - 1.0)),
            to_channel(84.0 + t * (37.0 - 84.0)),
            255,
        ]
    }

    fn name(&self) -> &str {
        "viridis"
    }
}

/// Magma approximation - black through purple to orange
pub struct Magma;

impl ColorRamp for Magma {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let Some(t) = clamp_unit(value) else {
            return NO_DATA;
        };
        [
            to_channel(t.powf(1.2) * 255.0),
            to_channel(t * 80.0),
            to_channel(3.0 + t * 150.0),
            255,
        ]
    }

    fn name(&self) -> &str {
        "magma"
    }
}

/// Coolwarm approximation - blue to red
pub struct Coolwarm;

impl ColorRamp for Coolwarm {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let Some(t) = clamp_unit(value) else {
            return NO_DATA;
        };
        [
            to_channel(59.0 + 196.0 * t),
            to_channel(76.0 + 96.0 * t),
            to_channel(192.0 - 152.0 * t),
            255,
        ]
    }

    fn name(&self) -> &str {
        "coolwarm"
    }
}

/// Terrain - green, yellow, orange, white in four equal segments
pub struct Terrain;

impl ColorRamp for Terrain {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let Some(t) = clamp_unit(value) else {
            return NO_DATA;
        };
        if t < 0.25 {
            [0, to_channel(128.0 + 127.0 * t / 0.25), 0, 255]
        } else if t < 0.5 {
            [to_channel(255.0 * (t - 0.25) / 0.25), 255, 0, 255]
        } else if t < 0.75 {
            [255, to_channel(255.0 * (0.75 - t) / 0.25), 0, 255]
        } else {
            [255, 255, to_channel(255.0 * (t - 0.75) / 0.25), 255]
        }
    }

    fn name(&self) -> &str {
        "terrain"
    }
}
