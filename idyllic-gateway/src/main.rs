//! Entry point for the `idyllic-gateway` HTTP server.

use std::sync::Arc;

use clap::Parser;
use idyllic_core::UserStore;
use idyllic_gateway::{config::GatewayConfig, routes::create_router, telemetry};
use tracing::info;

#[tokio::main]
async fn main() {
    let config = GatewayConfig::parse();
    telemetry::init(&config.log_level);

    let store = Arc::new(UserStore::new());
    let app = create_router(store, &config);

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, cors = config.cors, "idyllic-gateway listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }

    info!("idyllic-gateway stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
