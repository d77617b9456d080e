//! # UserHub Server
//!
//! Entry point: loads configuration, wires the module and serves the REST API
//! until Ctrl+C or SIGTERM.

use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use userhub_config::ConfigLoader;
use userhub_core::HealthCheck;
use userhub_repository::DatabaseHealthCheck;
use userhub_rest::{create_router, AppState};
use userhub_server::{
    di::{connect_app_module, ServiceResolver},
    startup::print_startup_info,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {:#}", e);
        eprintln!("userhub-server: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config_loader =
        ConfigLoader::from_default_location().context("Failed to load configuration")?;
    let config = config_loader.get().await;

    init_tracing(&config.observability)?;

    info!("Starting UserHub server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    print_startup_info(&config);

    let module = connect_app_module(&config)
        .await
        .context("Failed to initialise application module")?;

    let db_pool = module.database_pool();
    let health_checks: Vec<Arc<dyn HealthCheck>> =
        vec![Arc::new(DatabaseHealthCheck::new(db_pool.clone()))];
    let state = AppState::new(module.user_service()).with_health_checks(health_checks);

    let router = create_router(state, &config.app, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
