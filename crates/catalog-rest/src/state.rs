//! Application state for Axum handlers.

use catalog_core::HealthCheck;
use catalog_service::{ComponentService, ManufacturerService, ProductService};
use metrics_exporter_prometheus::PrometheusHandle;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub manufacturer_service: Arc<dyn ManufacturerService>,
    pub component_service: Arc<dyn ComponentService>,
    /// Dependencies probed by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Prometheus recorder handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        manufacturer_service: Arc<dyn ManufacturerService>,
        component_service: Arc<dyn ComponentService>,
    ) -> Self {
        Self {
            product_service,
            manufacturer_service,
            component_service,
            health_checks: Vec::new(),
            metrics: None,
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn ProductService>
            + HasComponent<dyn ManufacturerService>
            + HasComponent<dyn ComponentService>,
    {
        Self::new(module.resolve(), module.resolve(), module.resolve())
    }

    /// Adds a dependency to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Attaches the Prometheus handle rendered by the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
