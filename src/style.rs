//! Band-interpolation style handed to the map renderer.
//!
//! The renderer expects a nested-array expression such as
//! `["interpolate", ["linear"], ["band", 1], 0, [0, 0, 255], 255, [255, 0, 0]]`.
//! Inside the crate the expression is a typed value; the array form is only
//! produced at the boundary by [`StyleExpression::to_expression_value`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::colormaps::StopRamp;
use crate::error::{GeoLegendError, Result};
use crate::legend::LegendRange;

/// One (data value, color) control point of an interpolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleStop {
    pub value: f64,
    pub color: [u8; 4],
}

/// A typed style expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StyleExpression {
    /// Linear interpolation of a raster band's value between color stops
    Interpolate {
        /// 1-based band index
        band: u32,
        stops: Vec<StyleStop>,
    },
}

impl StyleExpression {
    /// Spread the stops of `ramp` across `range` for the given band
    pub fn from_ramp(band: u32, ramp: &StopRamp, range: &LegendRange) -> Result<Self> {
        if band == 0 {
            return Err(GeoLegendError::InvalidParameter {
                param: "band".to_string(),
                message: "Band indexes start at 1".to_string(),
            });
        }

        let stops = ramp
            .stops()
            .iter()
            .map(|stop| StyleStop {
                value: range.value_at(stop.position),
                color: [stop.color[0], stop.color[1], stop.color[2], 255],
            })
            .collect();

        Ok(StyleExpression::Interpolate { band, stops })
    }

    pub fn band(&self) -> u32 {
        match self {
            StyleExpression::Interpolate { band, .. } => *band,
        }
    }

    pub fn stops(&self) -> &[StyleStop] {
        match self {
            StyleExpression::Interpolate { stops, .. } => stops,
        }
    }

    /// Render the renderer's nested-array form of this expression
    pub fn to_expression_value(&self) -> Value {
        match self {
            StyleExpression::Interpolate { band, stops } => {
                let mut expr = vec![json!("interpolate"), json!(["linear"]), json!(["band", band])];
                for stop in stops {
                    expr.push(json!(stop.value));
                    expr.push(color_value(stop.color));
                }
                Value::Array(expr)
            }
        }
    }
}

/// `[r, g, b]` for opaque colors, `[r, g, b, alpha]` with alpha in [0, 1] otherwise
fn color_value(color: [u8; 4]) -> Value {
    let [r, g, b, a] = color;
    if a == 255 {
        json!([r, g, b])
    } else {
        json!([r, g, b, a as f64 / 255.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_linear_ramp_maps_to_range_bounds() {
        let range = LegendRange::new(12.0, 480.0);
        let expr = StyleExpression::from_ramp(1, &StopRamp::linear(), &range).unwrap();

        assert_eq!(expr.band(), 1);
        assert_eq!(
            expr.stops(),
            &[
                StyleStop {
                    value: 12.0,
                    color: [0, 0, 255, 255]
                },
                StyleStop {
                    value: 480.0,
                    color: [255, 0, 0, 255]
                },
            ]
        );
    }

    #[test]
    fn test_expression_array_form() {
        let expr = StyleExpression::from_ramp(1, &StopRamp::linear(), &LegendRange::default())
            .unwrap();
        assert_eq!(
            expr.to_expression_value(),
            json!(["interpolate", ["linear"], ["band", 1], 0.0, [0, 0, 255], 255.0, [255, 0, 0]])
        );
    }

    #[test]
    fn test_tricolor_midpoint_value() {
        let range = LegendRange::new(0.0, 100.0);
        let expr = StyleExpression::from_ramp(2, &StopRamp::tricolor(), &range).unwrap();
        let values: Vec<f64> = expr.stops().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0]);
        assert_eq!(expr.stops()[1].color, [0, 255, 0, 255]);
    }

    #[test]
    fn test_band_zero_is_rejected() {
        let result = StyleExpression::from_ramp(0, &StopRamp::linear(), &LegendRange::default());
        assert!(matches!(result, Err(GeoLegendError::InvalidParameter { .. })));
    }

    #[test]
    fn test_translucent_colors_carry_alpha() {
        assert_eq!(color_value([255, 255, 255, 0]), json!([255, 255, 255, 0.0]));
        assert_eq!(color_value([1, 2, 3, 255]), json!([1, 2, 3]));
    }

    #[test]
    fn test_typed_serialization_is_tagged() {
        let expr = StyleExpression::Interpolate {
            band: 1,
            stops: vec![],
        };
        let value = serde_json::to_value(&expr).unwrap();
        assert_eq!(value, json!({ "op": "interpolate", "band": 1, "stops": [] }));
    }
}
