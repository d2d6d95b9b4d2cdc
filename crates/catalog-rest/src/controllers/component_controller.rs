//! Component controller.

use crate::{
    extractors::{EntityId, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use catalog_core::{Component, ComponentDraft, ErrorResponse};
use axum::{extract::State, http::StatusCode, routing::get, Router};

/// Creates the component router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_components).post(create_component))
        .route(
            "/:id",
            get(get_component)
                .put(update_component)
                .delete(delete_component),
        )
}

/// List all components.
#[utoipa::path(
    get,
    path = "/components",
    tag = "components",
    responses((status = 200, description = "All components", body = [Component]))
)]
pub async fn list_components(State(state): State<AppState>) -> ApiResult<Vec<Component>> {
    ok(state.component_service.list_components().await?)
}

/// Create a component.
#[utoipa::path(
    post,
    path = "/components",
    tag = "components",
    request_body = ComponentDraft,
    responses(
        (status = 201, description = "Component created", body = Component),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_component(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<ComponentDraft>,
) -> CreatedResult<Component> {
    created(state.component_service.create_component(draft).await?)
}

/// Get a component by ID.
#[utoipa::path(
    get,
    path = "/components/{id}",
    tag = "components",
    params(("id" = String, Path, description = "Component id")),
    responses(
        (status = 200, description = "Component found", body = Component),
        (status = 404, description = "Component not found", body = ErrorResponse)
    )
)]
pub async fn get_component(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Component>,
) -> ApiResult<Component> {
    ok(state.component_service.get_component(&id).await?)
}

/// Replace a component's fields.
#[utoipa::path(
    put,
    path = "/components/{id}",
    tag = "components",
    params(("id" = String, Path, description = "Component id")),
    request_body = ComponentDraft,
    responses(
        (status = 200, description = "Component updated", body = Component),
        (status = 404, description = "Component not found", body = ErrorResponse)
    )
)]
pub async fn update_component(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Component>,
    ValidatedJson(draft): ValidatedJson<ComponentDraft>,
) -> ApiResult<Component> {
    ok(state.component_service.update_component(&id, draft).await?)
}

/// Delete a component.
#[utoipa::path(
    delete,
    path = "/components/{id}",
    tag = "components",
    params(("id" = String, Path, description = "Component id")),
    responses(
        (status = 204, description = "Component deleted"),
        (status = 404, description = "Component not found", body = ErrorResponse)
    )
)]
pub async fn delete_component(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Component>,
) -> Result<StatusCode, AppError> {
    state.component_service.delete_component(&id).await?;
    Ok(no_content())
}
