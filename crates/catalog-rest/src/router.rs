//! Main application router.

use crate::{
    controllers::{
        component_controller, health_controller, manufacturer_controller, metrics_controller,
        product_controller,
    },
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use catalog_config::AppConfig;
use axum::{middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Resource routes live under `/api/v1`; health, metrics and the Swagger UI
/// are mounted at the root.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = create_cors_layer(config);

    let api_router = Router::new()
        .nest("/products", product_controller::router())
        .nest("/manufacturers", manufacturer_controller::router())
        .nest("/components", component_controller::router());

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router);

    if config.observability.metrics_enabled {
        router = router.merge(metrics_controller::router(&config.observability.metrics_path));
    }

    let router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(config: &AppConfig) -> CorsLayer {
    let server = &config.server;
    if !server.cors_enabled {
        return CorsLayer::new();
    }
    if server.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Catalog API v1"
}
