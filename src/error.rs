//! Error types for geolegend.
//!
//! Most conditions in the legend and progress core are recovered with
//! substitution defaults. The variants here cover what remains: bad
//! configuration, bad request parameters, unknown ramps and I/O.

use thiserror::Error;

/// The main error type for geolegend operations.
#[derive(Error, Debug)]
pub enum GeoLegendError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// A ramp was requested by a name that is not registered
    #[error("Unknown color ramp: {name}")]
    UnknownRamp { name: String },

    /// A stop list that breaks the ramp invariants
    #[error("Invalid color ramp: {message}")]
    InvalidRamp { message: String },

    /// Legend image encoding errors
    #[error("Image encoding error: {0}")]
    ImageEncoding(#[from] image::ImageError),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Convenience type alias for Results with GeoLegendError
pub type Result<T> = std::result::Result<T, GeoLegendError>;
