//! # FTA QR Decoder Service
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Decoder Server                                   │
//! │                                                                         │
//! │  Scanner ───► HTTP (8080) ───► POST /decode-fta-qr ───► fta-qr-core    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fta_qr_decoder::{build_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: it carries the default log filter
    let config = ServiceConfig::load()?;
    init_tracing(&config.log_filter);

    info!("Starting FTA QR decoder service...");
    info!(
        addr = %config.bind_address(),
        timeout_secs = config.request_timeout_secs,
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let bind_addr = config.bind_address();
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Decoder service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
