//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use catalog_core::{
    Component, ComponentDraft, ComponentId, EmbeddedComponent, ErrorResponse, FieldError,
    Manufacturer, ManufacturerDraft, ManufacturerId, Product, ProductDraft, ProductId,
};
use catalog_service::{ManufacturerWithProducts, NewManufacturerRequest, ProductWithManufacturers};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Product catalog with cache-aside reads over MongoDB and Redis",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::product_controller::add_component,
        crate::controllers::product_controller::add_manufacturer,
        crate::controllers::product_controller::get_product_manufacturers,
        // Manufacturer endpoints
        crate::controllers::manufacturer_controller::list_manufacturers,
        crate::controllers::manufacturer_controller::create_manufacturer,
        crate::controllers::manufacturer_controller::get_manufacturer,
        crate::controllers::manufacturer_controller::update_manufacturer,
        crate::controllers::manufacturer_controller::delete_manufacturer,
        crate::controllers::manufacturer_controller::get_manufacturer_products,
        // Component endpoints
        crate::controllers::component_controller::list_components,
        crate::controllers::component_controller::create_component,
        crate::controllers::component_controller::get_component,
        crate::controllers::component_controller::update_component,
        crate::controllers::component_controller::delete_component,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            ManufacturerId,
            ComponentId,
            ErrorResponse,
            FieldError,
            Product,
            ProductDraft,
            EmbeddedComponent,
            Manufacturer,
            ManufacturerDraft,
            Component,
            ComponentDraft,
            NewManufacturerRequest,
            ProductWithManufacturers,
            ManufacturerWithProducts,
            HealthResponse,
        )
    ),
    tags(
        (name = "products", description = "Product endpoints"),
        (name = "manufacturers", description = "Manufacturer endpoints"),
        (name = "components", description = "Component endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
