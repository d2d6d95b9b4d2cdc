//! Common test infrastructure for MongoDB integration tests.

use catalog_config::MongoConfig;
use catalog_repository::{MongoConnection, MongoConnectionInterface};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mongo::Mongo;

/// Test database container wrapper.
///
/// Manages a MongoDB testcontainer lifecycle and provides a shared connection.
pub struct TestDatabase {
    _container: ContainerAsync<Mongo>,
    connection: Arc<MongoConnection>,
}

impl TestDatabase {
    /// Creates a new test database with a fresh MongoDB container.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let config = MongoConfig {
            url: format!("mongodb://127.0.0.1:{}", port),
            database: "catalog_test".to_string(),
            ..MongoConfig::default()
        };

        let connection = Self::connect_with_retry(&config, 30).await;
        connection
            .ensure_indexes()
            .await
            .expect("Failed to create indexes");

        Self {
            _container: container,
            connection: Arc::new(connection),
        }
    }

    /// Returns the shared connection as the injected interface.
    pub fn connection(&self) -> Arc<dyn MongoConnectionInterface> {
        self.connection.clone()
    }

    async fn connect_with_retry(config: &MongoConfig, max_attempts: u32) -> MongoConnection {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match MongoConnection::connect(config).await {
                Ok(connection) => return connection,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!(
                            "Failed to connect to MongoDB after {} attempts: {}",
                            max_attempts, e
                        );
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
