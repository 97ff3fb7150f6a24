//! Color ramp implementations for legend and style generation.
//!
//! Provides the named palettes and the stop-based ramps, plus lookup by name.

pub mod colormap;
pub mod named;
pub mod stops;

pub use colormap::{available_colormaps, get_colormap, lerp_color, ColorRamp, NO_DATA};

// Re-export commonly used ramps
pub use named::{Coolwarm, Magma, Terrain, Viridis};
pub use stops::{ColorStop, StopRamp};
