//! MongoDB connection management.

use crate::mongo::{store_error, MANUFACTURERS};
use catalog_config::MongoConfig;
use catalog_core::{CatalogError, CatalogResult, HealthCheck, HealthStatus, Interface};
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use shaku::Component;
use tracing::{info, warn};

/// Interface for the shared document store handle.
#[async_trait]
pub trait MongoConnectionInterface: Interface + Send + Sync {
    /// Returns the catalog database.
    fn database(&self) -> CatalogResult<&Database>;

    /// Round-trips a `ping` command to the server.
    async fn ping(&self) -> CatalogResult<()>;
}

/// Process-wide MongoDB handle.
///
/// The driver keeps its own connection pool behind the client, so a single
/// instance is shared by every repository. The default value is
/// disconnected and fails every operation with a store error.
#[derive(Component, Default)]
#[shaku(interface = MongoConnectionInterface)]
pub struct MongoConnection {
    database: Option<Database>,
}

impl MongoConnection {
    /// Connects to MongoDB and verifies the server is reachable.
    pub async fn connect(config: &MongoConfig) -> CatalogResult<Self> {
        info!("Connecting to MongoDB database '{}'...", config.database);

        let mut options = ClientOptions::parse(&config.url).await.map_err(|e| {
            warn!("Invalid MongoDB connection string: {}", e);
            CatalogError::Configuration(format!("Invalid MongoDB URL: {}", e))
        })?;
        options.app_name = Some("catalog".to_string());
        options.min_pool_size = Some(config.min_pool_size);
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = Client::with_options(options).map_err(store_error)?;
        let connection = Self::with_database(client.database(&config.database));
        connection.ping().await?;

        info!("MongoDB connection established");
        Ok(connection)
    }

    /// Wraps an existing database handle.
    #[must_use]
    pub fn with_database(database: Database) -> Self {
        Self {
            database: Some(database),
        }
    }

    /// Returns the underlying database handle, if connected.
    #[must_use]
    pub fn inner(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Creates the indexes the repositories rely on.
    pub async fn ensure_indexes(&self) -> CatalogResult<()> {
        let database = MongoConnectionInterface::database(self)?;
        let index = IndexModel::builder()
            .keys(doc! { "products": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_manufacturer_products".to_string())
                    .build(),
            )
            .build();

        database
            .collection::<Document>(MANUFACTURERS)
            .create_index(index)
            .await
            .map_err(store_error)?;

        info!("Catalog indexes created successfully");
        Ok(())
    }

    /// Shuts the client down, waiting for in-flight operations.
    pub async fn shutdown(&self) {
        if let Some(database) = &self.database {
            info!("Closing MongoDB connection...");
            database.client().clone().shutdown().await;
            info!("MongoDB connection closed");
        }
    }
}

#[async_trait]
impl MongoConnectionInterface for MongoConnection {
    fn database(&self) -> CatalogResult<&Database> {
        self.database
            .as_ref()
            .ok_or_else(|| CatalogError::store("MongoDB connection not configured"))
    }

    async fn ping(&self) -> CatalogResult<()> {
        MongoConnectionInterface::database(self)?
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for MongoConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConnection")
            .field("database", &self.database.as_ref().map(Database::name))
            .finish()
    }
}

/// Health check backed by a MongoDB `ping`.
pub struct MongoHealthCheck {
    connection: std::sync::Arc<dyn MongoConnectionInterface>,
}

impl MongoHealthCheck {
    /// Creates a health check over the shared connection.
    #[must_use]
    pub fn new(connection: std::sync::Arc<dyn MongoConnectionInterface>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl HealthCheck for MongoHealthCheck {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn check(&self) -> HealthStatus {
        match self.connection.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
