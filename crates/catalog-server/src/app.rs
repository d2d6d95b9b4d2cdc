//! Application builder.

use crate::di::build_catalog_module;
use crate::startup::{init_metrics, print_startup_info};
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{MongoConnection, MongoHealthCheck};
use catalog_rest::{create_router, AppState};
use catalog_service::CacheHealthCheck;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Application builder for constructing and running the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the stores, wires the module and serves HTTP until `shutdown`
    /// resolves.
    pub async fn run<F>(self, shutdown: F) -> CatalogResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.config.unwrap_or_default();
        let metrics = init_metrics(&config.observability)?;

        let connection = MongoConnection::connect(&config.mongodb).await?;
        connection.ensure_indexes().await?;

        let module = build_catalog_module(&connection, &config)?;

        let mut state = AppState::from_module(module.as_ref())
            .with_health_check(Arc::new(MongoHealthCheck::new(module.connection())))
            .with_health_check(Arc::new(CacheHealthCheck::new(module.cache())));
        if let Some(handle) = metrics {
            state = state.with_metrics(handle);
        }

        let router = create_router(state, &config);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CatalogError::internal(format!("Failed to bind {}: {}", addr, e)))?;
        print_startup_info(&config);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CatalogError::internal(format!("REST server error: {}", e)))?;

        connection.shutdown().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
