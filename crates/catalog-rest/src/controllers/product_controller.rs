//! Product controller.

use crate::{
    extractors::{EntityId, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use catalog_core::{EmbeddedComponent, ErrorResponse, Manufacturer, Product, ProductDraft};
use catalog_service::{NewManufacturerRequest, ProductWithManufacturers};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/components", post(add_component))
        .route(
            "/:id/manufacturers",
            get(get_product_manufacturers).post(add_manufacturer),
        )
}

/// List all products.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 503, description = "Store or cache unavailable", body = ErrorResponse)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    debug!("List products request");
    ok(state.product_service.list_products().await?)
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> CreatedResult<Product> {
    debug!("Create product request: {}", draft.name);
    created(state.product_service.create_product(draft).await?)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
) -> ApiResult<Product> {
    debug!("Get product request: {}", id);
    ok(state.product_service.get_product(&id).await?)
}

/// Replace a product's fields.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> ApiResult<Product> {
    debug!("Update product request: {}", id);
    ok(state.product_service.update_product(&id, draft).await?)
}

/// Delete a product and remove it from every manufacturer.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);
    state.product_service.delete_product(&id).await?;
    Ok(no_content())
}

/// Append an embedded component to a product.
#[utoipa::path(
    post,
    path = "/products/{id}/components",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = EmbeddedComponent,
    responses(
        (status = 201, description = "Component added", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn add_component(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
    ValidatedJson(component): ValidatedJson<EmbeddedComponent>,
) -> CreatedResult<Product> {
    debug!("Add component request: {}", id);
    created(state.product_service.add_component(&id, component).await?)
}

/// Create a manufacturer for a product.
#[utoipa::path(
    post,
    path = "/products/{id}/manufacturers",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = NewManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn add_manufacturer(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
    ValidatedJson(request): ValidatedJson<NewManufacturerRequest>,
) -> CreatedResult<Manufacturer> {
    debug!("Add manufacturer request: {}", id);
    created(state.product_service.add_manufacturer(&id, request).await?)
}

/// Get a product with the manufacturers referencing it.
#[utoipa::path(
    get,
    path = "/products/{id}/manufacturers",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product and its manufacturers", body = ProductWithManufacturers),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product_manufacturers(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Product>,
) -> ApiResult<ProductWithManufacturers> {
    debug!("Get product manufacturers request: {}", id);
    ok(state.product_service.get_product_manufacturers(&id).await?)
}
