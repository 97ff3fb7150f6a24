//! Piecewise-linear ramps defined by an ordered list of color stops.
//!
//! These are the ramps whose stops are also handed to the map renderer, so
//! the legend gradient and the on-map coloring use the same boundary colors.

use serde::{Deserialize, Serialize};

use super::colormap::{clamp_unit, lerp_color, ColorRamp, NO_DATA};
use crate::error::{GeoLegendError, Result};

pub const BLUE: [u8; 3] = [0, 0, 255];
pub const CYAN: [u8; 3] = [0, 255, 255];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const YELLOW: [u8; 3] = [255, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];

/// A single control point of a [`StopRamp`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in [0, 1]
    pub position: f32,
    /// RGB color at this position
    pub color: [u8; 3],
}

impl ColorStop {
    pub fn new(position: f32, color: [u8; 3]) -> Self {
        Self { position, color }
    }
}

/// A ramp interpolating linearly between adjacent stops.
///
/// Invariants (checked by [`StopRamp::new`]): at least two stops, positions
/// strictly increasing, first position 0.0, last position 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRamp {
    name: String,
    stops: Vec<ColorStop>,
}

impl StopRamp {
    /// Build a ramp, validating the stop invariants
    pub fn new(name: impl Into<String>, stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(GeoLegendError::InvalidRamp {
                message: format!("at least two stops are required, got {}", stops.len()),
            });
        }
        if stops.iter().any(|s| !s.position.is_finite()) {
            return Err(GeoLegendError::InvalidRamp {
                message: "stop positions must be finite".to_string(),
            });
        }
        if stops[0].position != 0.0 || stops[stops.len() - 1].position != 1.0 {
            return Err(GeoLegendError::InvalidRamp {
                message: "stops must start at 0.0 and end at 1.0".to_string(),
            });
        }
        if let Some(pair) = stops.windows(2).find(|w| w[1].position <= w[0].position) {
            return Err(GeoLegendError::InvalidRamp {
                message: format!(
                    "stop positions must be strictly increasing ({} then {})",
                    pair[0].position, pair[1].position
                ),
            });
        }

        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Two-stop ramp from `start` at 0.0 to `end` at 1.0
    pub fn two_stop(name: impl Into<String>, start: [u8; 3], end: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            stops: vec![ColorStop::new(0.0, start), ColorStop::new(1.0, end)],
        }
    }

    /// Three-stop ramp with `middle` at 0.5
    pub fn three_stop(
        name: impl Into<String>,
        start: [u8; 3],
        middle: [u8; 3],
        end: [u8; 3],
    ) -> Self {
        Self {
            name: name.into(),
            stops: vec![
                ColorStop::new(0.0, start),
                ColorStop::new(0.5, middle),
                ColorStop::new(1.0, end),
            ],
        }
    }

    /// Blue to red
    pub fn linear() -> Self {
        Self::two_stop("linear", BLUE, RED)
    }

    /// Blue, green, red
    pub fn tricolor() -> Self {
        Self::three_stop("tricolor", BLUE, GREEN, RED)
    }

    /// Blue, cyan, green, yellow, red at quarter steps
    pub fn spectrum() -> Self {
        Self {
            name: "spectrum".to_string(),
            stops: vec![
                ColorStop::new(0.0, BLUE),
                ColorStop::new(0.25, CYAN),
                ColorStop::new(0.5, GREEN),
                ColorStop::new(0.75, YELLOW),
                ColorStop::new(1.0, RED),
            ],
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn first_color(&self) -> [u8; 3] {
        self.stops[0].color
    }

    pub fn last_color(&self) -> [u8; 3] {
        self.stops[self.stops.len() - 1].color
    }

    /// Like [`ColorRamp::map_normalized`], but any input outside [0, 1]
    /// yields [`NO_DATA`] instead of clamping.
    pub fn evaluate_strict(&self, value: f32) -> [u8; 4] {
        if !(0.0..=1.0).contains(&value) {
            return NO_DATA;
        }
        self.map_normalized(value)
    }
}

impl ColorRamp for StopRamp {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let Some(t) = clamp_unit(value) else {
            return NO_DATA;
        };

        let rgb = self
            .stops
            .windows(2)
            .find(|w| t <= w[1].position)
            .map(|w| {
                let (s0, s1) = (w[0], w[1]);
                let f = (t - s0.position) / (s1.position - s0.position);
                lerp_color(s0.color, s1.color, f)
            })
            .unwrap_or_else(|| self.last_color());

        [rgb[0], rgb[1], rgb[2], 255]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn between(v: u8, a: u8, b: u8) -> bool {
        v >= a.min(b) && v <= a.max(b)
    }

    #[test]
    fn test_endpoints_match_first_and_last_stop() {
        for ramp in [StopRamp::linear(), StopRamp::tricolor(), StopRamp::spectrum()] {
            let first = ramp.first_color();
            let last = ramp.last_color();
            assert_eq!(ramp.map_normalized(0.0), [first[0], first[1], first[2], 255]);
            assert_eq!(ramp.map_normalized(1.0), [last[0], last[1], last[2], 255]);
        }
    }

    #[test]
    fn test_clamping() {
        let ramp = StopRamp::linear();
        assert_eq!(ramp.map_normalized(-0.5), ramp.map_normalized(0.0));
        assert_eq!(ramp.map_normalized(1.5), ramp.map_normalized(1.0));
    }

    #[test]
    fn test_channels_stay_between_adjacent_stops() {
        let ramp = StopRamp::spectrum();
        for i in 0..=200 {
            let t = i as f32 / 200.0;
            let color = ramp.map_normalized(t);
            let w = ramp
                .stops()
                .windows(2)
                .find(|w| t <= w[1].position)
                .unwrap();
            for c in 0..3 {
                assert!(
                    between(color[c], w[0].color[c], w[1].color[c]),
                    "channel {c} at t={t} out of bounds: {color:?}"
                );
            }
        }
    }

    #[test]
    fn test_tricolor_middle_is_green() {
        assert_eq!(StopRamp::tricolor().map_normalized(0.5), [0, 255, 0, 255]);
    }

    #[test]
    fn test_spectrum_interpolates_within_segment() {
        // Halfway between cyan (0.25) and green (0.5)
        assert_eq!(StopRamp::spectrum().map_normalized(0.375), [0, 255, 128, 255]);
    }

    #[test]
    fn test_evaluate_strict() {
        let ramp = StopRamp::spectrum();
        assert_eq!(ramp.evaluate_strict(1.2), NO_DATA);
        assert_eq!(ramp.evaluate_strict(-0.1), NO_DATA);
        assert_eq!(ramp.evaluate_strict(f32::NAN), NO_DATA);
        assert_eq!(ramp.evaluate_strict(0.5), ramp.map_normalized(0.5));
    }

    #[test]
    fn test_new_rejects_bad_stops() {
        assert!(StopRamp::new("one", vec![ColorStop::new(0.0, BLUE)]).is_err());
        assert!(StopRamp::new(
            "late start",
            vec![ColorStop::new(0.1, BLUE), ColorStop::new(1.0, RED)]
        )
        .is_err());
        assert!(StopRamp::new(
            "early end",
            vec![ColorStop::new(0.0, BLUE), ColorStop::new(0.9, RED)]
        )
        .is_err());
        assert!(StopRamp::new(
            "repeat",
            vec![
                ColorStop::new(0.0, BLUE),
                ColorStop::new(0.5, GREEN),
                ColorStop::new(0.5, YELLOW),
                ColorStop::new(1.0, RED),
            ]
        )
        .is_err());
        assert!(StopRamp::new(
            "nan",
            vec![
                ColorStop::new(0.0, BLUE),
                ColorStop::new(f32::NAN, GREEN),
                ColorStop::new(1.0, RED),
            ]
        )
        .is_err());
    }

    #[test]
    fn test_new_accepts_valid_stops() {
        let ramp = StopRamp::new(
            "custom",
            vec![
                ColorStop::new(0.0, [0, 0, 0]),
                ColorStop::new(0.2, [10, 20, 30]),
                ColorStop::new(1.0, [255, 255, 255]),
            ],
        )
        .unwrap();
        assert_eq!(ramp.name(), "custom");
        assert_eq!(ramp.stops().len(), 3);
        assert_eq!(ramp.map_normalized(0.2), [10, 20, 30, 255]);
    }
}
