//! Manufacturer controller.

use crate::{
    extractors::{EntityId, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use catalog_core::{ErrorResponse, Manufacturer, ManufacturerDraft};
use catalog_service::ManufacturerWithProducts;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::debug;

/// Creates the manufacturer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/:id",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
        .route("/:id/products", get(get_manufacturer_products))
}

/// List all manufacturers.
#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "manufacturers",
    responses(
        (status = 200, description = "All manufacturers", body = [Manufacturer]),
        (status = 503, description = "Store or cache unavailable", body = ErrorResponse)
    )
)]
pub async fn list_manufacturers(State(state): State<AppState>) -> ApiResult<Vec<Manufacturer>> {
    debug!("List manufacturers request");
    ok(state.manufacturer_service.list_manufacturers().await?)
}

/// Create a manufacturer.
#[utoipa::path(
    post,
    path = "/manufacturers",
    tag = "manufacturers",
    request_body = ManufacturerDraft,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 400, description = "Unknown product reference", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<ManufacturerDraft>,
) -> CreatedResult<Manufacturer> {
    debug!("Create manufacturer request: {}", draft.name);
    created(state.manufacturer_service.create_manufacturer(draft).await?)
}

/// Get a manufacturer by ID.
#[utoipa::path(
    get,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    params(("id" = String, Path, description = "Manufacturer id")),
    responses(
        (status = 200, description = "Manufacturer found", body = Manufacturer),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse)
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Manufacturer>,
) -> ApiResult<Manufacturer> {
    debug!("Get manufacturer request: {}", id);
    ok(state.manufacturer_service.get_manufacturer(&id).await?)
}

/// Replace a manufacturer's fields.
#[utoipa::path(
    put,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    params(("id" = String, Path, description = "Manufacturer id")),
    request_body = ManufacturerDraft,
    responses(
        (status = 200, description = "Manufacturer updated", body = Manufacturer),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse)
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Manufacturer>,
    ValidatedJson(draft): ValidatedJson<ManufacturerDraft>,
) -> ApiResult<Manufacturer> {
    debug!("Update manufacturer request: {}", id);
    ok(state.manufacturer_service.update_manufacturer(&id, draft).await?)
}

/// Delete a manufacturer.
#[utoipa::path(
    delete,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    params(("id" = String, Path, description = "Manufacturer id")),
    responses(
        (status = 204, description = "Manufacturer deleted"),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse)
    )
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Manufacturer>,
) -> Result<StatusCode, AppError> {
    debug!("Delete manufacturer request: {}", id);
    state.manufacturer_service.delete_manufacturer(&id).await?;
    Ok(no_content())
}

/// Get a manufacturer with its products resolved.
#[utoipa::path(
    get,
    path = "/manufacturers/{id}/products",
    tag = "manufacturers",
    params(("id" = String, Path, description = "Manufacturer id")),
    responses(
        (status = 200, description = "Manufacturer and its products", body = ManufacturerWithProducts),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse)
    )
)]
pub async fn get_manufacturer_products(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Manufacturer>,
) -> ApiResult<ManufacturerWithProducts> {
    debug!("Get manufacturer products request: {}", id);
    ok(state.manufacturer_service.get_manufacturer_products(&id).await?)
}
