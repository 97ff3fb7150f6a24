//! geolegend - legend, style and progress service for GeoTIFF map overlays
//!
//! This is the main entry point for the geolegend server.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use geolegend::handlers::router;
use geolegend::logging::log_error;
use geolegend::{init_tracing, AppState, Config, GeoLegendError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first so the log level can come from it
    let config = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting geolegend v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        log_error(&e, "validating configuration");
        e
    })?;

    let state = AppState::new_shared(config.clone()).map_err(|e| {
        log_error(&e, "building application state");
        e
    })?;

    info!(
        ramp = %config.legend.ramp,
        style_ramp = %config.legend.style_ramp,
        band = config.legend.band,
        static_dir = ?config.server.static_dir,
        source_url = ?config.source.url,
        "Legend session ready"
    );

    let app = router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| GeoLegendError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GeoLegendError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {}", e);
            GeoLegendError::Server {
                message: format!("Server error: {}", e),
            }
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
