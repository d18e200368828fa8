//! HTTP API for scoutbook profile and company records.
//!
//! # Responsibility
//! - Wire configuration, storage and routes into a running server.
//! - Keep request handling stateless apart from the injected `Store`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, DatabaseTarget, ServerConfig};
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;

use log::info;
use scoutbook_core::Store;
use std::net::SocketAddr;

/// Serves the API on `bind` until Ctrl-C is received.
pub async fn serve(bind: SocketAddr, store: Store) -> anyhow::Result<()> {
    let app = build_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(
        "event=server_start module=api status=ok addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=api status=error error={err}");
    }
}
