//! Configuration management for geolegend.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{get_colormap, StopRamp};
use crate::error::{GeoLegendError, Result};

/// Command-line arguments for geolegend
#[derive(Parser, Debug, Default)]
#[command(name = "geolegend")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "GEOLEGEND_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "GEOLEGEND_PORT")]
    pub port: Option<u16>,

    /// Directory of front-end files to serve
    #[arg(short, long, env = "GEOLEGEND_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "GEOLEGEND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial legend color ramp
    #[arg(short, long, env = "GEOLEGEND_RAMP")]
    pub ramp: Option<String>,

    /// Raster band (1-based) the map style interpolates on
    #[arg(short, long, env = "GEOLEGEND_BAND")]
    pub band: Option<u32>,

    /// URL of the GeoTIFF the front end should load
    #[arg(long, env = "GEOLEGEND_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOLEGEND_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for any path the API does not handle
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Legend and style configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Ramp selected when the server starts
    #[serde(default = "default_ramp")]
    pub ramp: String,

    /// Stop ramp whose colors are handed to the map style
    #[serde(default = "default_style_ramp")]
    pub style_ramp: String,

    /// Band index (1-based) used in the style expression
    #[serde(default = "default_band")]
    pub band: u32,

    /// Default legend width in pixels
    #[serde(default = "default_legend_width")]
    pub width: u32,

    /// Default legend height in pixels
    #[serde(default = "default_legend_height")]
    pub height: u32,

    /// Delay before the front end hides its progress bar once loading completes
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,
}

/// Raster source description handed to the front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// GeoTIFF URL
    #[serde(default)]
    pub url: Option<String>,

    /// Code the custom projection is registered under (e.g. "MY:LOCAL")
    #[serde(default)]
    pub projection: Option<String>,

    /// File holding the projection's WKT definition
    #[serde(default)]
    pub wkt_file: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Legend configuration
    #[serde(default)]
    pub legend: LegendConfig,

    /// Raster source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments (clap folds in the environment)
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.static_dir.is_some() {
            config.server.static_dir = args.static_dir;
        }
        if let Some(ramp) = args.ramp {
            config.legend.ramp = ramp;
        }
        if let Some(band) = args.band {
            config.legend.band = band;
        }
        if args.source_url.is_some() {
            config.source.url = args.source_url;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.static_dir.is_some() {
            self.server.static_dir = other.server.static_dir;
        }
        self.legend = other.legend;
        if other.source.url.is_some() {
            self.source.url = other.source.url;
        }
        if other.source.projection.is_some() {
            self.source.projection = other.source.projection;
        }
        if other.source.wkt_file.is_some() {
            self.source.wkt_file = other.source.wkt_file;
        }
        self.log_level = other.log_level;
    }

    /// Read the projection WKT, if one is configured
    pub fn load_wkt(&self) -> Result<Option<String>> {
        match &self.source.wkt_file {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(GeoLegendError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 is not a valid port for users
        if self.server.port == 0 {
            return Err(GeoLegendError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GeoLegendError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        get_colormap(&self.legend.ramp).map_err(|_| GeoLegendError::Config {
            message: format!("Unknown legend ramp: {}", self.legend.ramp),
        })?;
        style_ramp_by_name(&self.legend.style_ramp)?;

        if self.legend.band == 0 {
            return Err(GeoLegendError::Config {
                message: "Band index must be 1 or greater".to_string(),
            });
        }

        if self.legend.width == 0 || self.legend.height == 0 {
            return Err(GeoLegendError::Config {
                message: format!(
                    "Legend size must be non-zero, got {}x{}",
                    self.legend.width, self.legend.height
                ),
            });
        }

        if let Some(dir) = &self.server.static_dir {
            if !dir.is_dir() {
                return Err(GeoLegendError::Config {
                    message: format!("Static directory does not exist: {}", dir.display()),
                });
            }
        }

        Ok(())
    }
}

/// Resolve the name of a ramp usable for the map style (stop ramps only)
pub fn style_ramp_by_name(name: &str) -> Result<StopRamp> {
    match name.to_lowercase().as_str() {
        "linear" => Ok(StopRamp::linear()),
        "tricolor" => Ok(StopRamp::tricolor()),
        "spectrum" => Ok(StopRamp::spectrum()),
        _ => Err(GeoLegendError::Config {
            message: format!(
                "Invalid style ramp: {}. Must be one of: linear, tricolor, spectrum",
                name
            ),
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            legend: LegendConfig::default(),
            source: SourceConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            ramp: default_ramp(),
            style_ramp: default_style_ramp(),
            band: default_band(),
            width: default_legend_width(),
            height: default_legend_height(),
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_ramp() -> String {
    "viridis".to_string()
}

fn default_style_ramp() -> String {
    "linear".to_string()
}

fn default_band() -> u32 {
    1
}

fn default_legend_width() -> u32 {
    256
}

fn default_legend_height() -> u32 {
    16
}

fn default_hide_delay_ms() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}
