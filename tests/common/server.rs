//! Test server bootstrap.
//!
//! Each test gets its own server on an ephemeral port so tests stay
//! independent of each other and of the tokio runtime that started them.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Start a geolegend server with the given configuration, returning its address
pub async fn start(mut config: geolegend::Config) -> SocketAddr {
    config.server.port = 0;

    let state = geolegend::AppState::new_shared(config).expect("Failed to build app state");
    let app = geolegend::handlers::router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    addr
}

/// Start a server with default configuration
pub async fn start_default() -> SocketAddr {
    start(geolegend::Config::default()).await
}

/// Start a server serving `dir` as its static directory
pub async fn start_with_static_dir(dir: PathBuf) -> SocketAddr {
    let mut config = geolegend::Config::default();
    config.server.static_dir = Some(dir);
    start(config).await
}
