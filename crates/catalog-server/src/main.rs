//! # Catalog Server
//!
//! Entry point for the product catalog service: loads configuration, sets up
//! logging and metrics, then serves the REST API until a shutdown signal.

use catalog_config::ConfigLoader;
use catalog_core::CatalogResult;
use catalog_server::app::AppBuilder;
use catalog_server::startup::{init_logging, print_banner};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CatalogResult<()> {
    let config = ConfigLoader::from_default_location()?.get().await;

    init_logging(&config.observability);
    print_banner();
    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    AppBuilder::new()
        .with_config(config)
        .run(shutdown_signal())
        .await
}

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
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
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
