//! Common test utilities for geolegend.
//!
//! This module provides shared utilities for testing the geolegend server.

pub mod http_client;
pub mod image_utils;
pub mod server;
