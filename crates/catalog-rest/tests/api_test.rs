//! End-to-end tests for the HTTP surface, backed by in-memory stores.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_config::AppConfig;
use catalog_core::{
    CatalogError, CatalogResult, EmbeddedComponent, HealthCheck, HealthStatus, Manufacturer,
    Product, ProductDraft, ProductId,
};
use catalog_repository::memory::{
    InMemoryComponentRepository, InMemoryManufacturerRepository, InMemoryProductRepository,
};
use catalog_rest::{create_router, AppState};
use catalog_service::{
    CacheInterface, ComponentServiceComponent, InMemoryCacheService, ManufacturerServiceComponent,
    NewManufacturerRequest, ProductService, ProductServiceComponent, ProductWithManufacturers,
};
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    products: Arc<InMemoryProductRepository>,
    manufacturers: Arc<InMemoryManufacturerRepository>,
}

fn services() -> (AppState, TestApp) {
    let products = Arc::new(InMemoryProductRepository::new());
    let manufacturers = Arc::new(InMemoryManufacturerRepository::new());
    let components = Arc::new(InMemoryComponentRepository::new());
    let cache: Arc<dyn CacheInterface> = Arc::new(InMemoryCacheService::new());

    let state = AppState::new(
        Arc::new(ProductServiceComponent::new(
            products.clone(),
            manufacturers.clone(),
            cache.clone(),
        )),
        Arc::new(ManufacturerServiceComponent::new(
            manufacturers.clone(),
            products.clone(),
            cache.clone(),
        )),
        Arc::new(ComponentServiceComponent::new(components, cache)),
    );

    let app = TestApp {
        router: Router::new(),
        products,
        manufacturers,
    };
    (state, app)
}

fn test_app() -> TestApp {
    let (state, mut app) = services();
    app.router = create_router(state, &AppConfig::default());
    app
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn widget() -> Value {
    json!({
        "name": "Widget",
        "description": "A small widget",
        "price": 9.99,
        "imagePath": "/img/w.png"
    })
}

#[tokio::test]
async fn test_product_lifecycle_with_manufacturer_cascade() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::POST, "/api/v1/products", Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let product_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(product_id.len(), 24);
    assert!(product_id.chars().all(|c| c.is_ascii_hexdigit()));

    let (status, body) = send(&app.router, Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Widget");

    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/api/v1/products/{product_id}/manufacturers"),
        Some(json!({
            "name": "Acme",
            "address": "1 Industrial Way",
            "contactNumber": 5551234,
            "profileImagePath": "/img/acme.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let manufacturer_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["products"], json!([product_id]));

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/api/v1/products/{product_id}/manufacturers"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["manufacturers"][0]["id"], manufacturer_id.as_str());

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/products/{product_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/api/v1/manufacturers/{manufacturer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"], json!([]));

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/api/v1/products/{product_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(app.products.snapshot().is_empty());
    assert!(app.manufacturers.snapshot()[0].products.is_empty());
}

#[tokio::test]
async fn test_list_is_served_from_cache_after_first_read() {
    let app = test_app();
    app.products
        .seed(serde_json::from_value::<ProductDraft>(widget()).unwrap())
        .unwrap();

    send(&app.router, Method::GET, "/api/v1/products", None).await;
    send(&app.router, Method::GET, "/api/v1/products", None).await;

    assert_eq!(app.products.find_all_calls(), 1);
}

#[tokio::test]
async fn test_add_component_returns_updated_product() {
    let app = test_app();
    let product = app
        .products
        .seed(serde_json::from_value::<ProductDraft>(widget()).unwrap())
        .unwrap();

    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/api/v1/products/{}/components", product.id),
        Some(json!({"name": "Spring", "description": "Coiled steel"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["components"][0]["name"], "Spring");
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::GET, "/api/v1/products/abc", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(app.products.find_by_id_calls(), 0);
}

#[tokio::test]
async fn test_delete_missing_product_is_not_found() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        "/api/v1/products/64b7f0c2a1b2c3d4e5f60718",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_body_lists_offending_fields() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/products",
        Some(json!({
            "name": "W",
            "description": "A small widget",
            "price": 9.999,
            "imagePath": "/img/w.png"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price"]);
    assert!(app.products.snapshot().is_empty());
}

#[tokio::test]
async fn test_manufacturer_with_unknown_product_is_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/manufacturers",
        Some(json!({
            "name": "Acme",
            "address": "1 Industrial Way",
            "contactNumber": 5551234,
            "profileImagePath": "/img/acme.png",
            "products": ["64b7f0c2a1b2c3d4e5f60718"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_component_crud() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/components",
        Some(json!({"name": "Spring", "description": "Coiled steel"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/v1/components/{id}"),
        Some(json!({"name": "Spring", "description": "Tempered steel"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "Tempered steel");

    let (status, _) = send(&app.router, Method::DELETE, &format!("/api/v1/components/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app.router, Method::GET, "/api/v1/components", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

struct StaticCheck {
    name: &'static str,
    status: HealthStatus,
}

#[async_trait]
impl HealthCheck for StaticCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> HealthStatus {
        self.status.clone()
    }
}

#[tokio::test]
async fn test_readiness_reports_failing_dependency() {
    let (state, _) = services();
    let state = state
        .with_health_check(Arc::new(StaticCheck {
            name: "mongodb",
            status: HealthStatus::Healthy,
        }))
        .with_health_check(Arc::new(StaticCheck {
            name: "cache",
            status: HealthStatus::Unhealthy("connection refused".to_string()),
        }));
    let router = create_router(state, &AppConfig::default());

    let (status, body) = send(&router, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["mongodb"], "healthy");
    assert_eq!(body["checks"]["cache"], "unhealthy: connection refused");

    let (status, _) = send(&router, Method::GET, "/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_route_absent_without_recorder() {
    let app = test_app();

    let (status, _) = send(&app.router, Method::GET, "/metrics", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

mock! {
    Products {}

    #[async_trait]
    impl ProductService for Products {
        async fn list_products(&self) -> CatalogResult<Vec<Product>>;
        async fn get_product(&self, id: &ProductId) -> CatalogResult<Product>;
        async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product>;
        async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<Product>;
        async fn delete_product(&self, id: &ProductId) -> CatalogResult<()>;
        async fn add_component(
            &self,
            id: &ProductId,
            component: EmbeddedComponent,
        ) -> CatalogResult<Product>;
        async fn add_manufacturer(
            &self,
            id: &ProductId,
            request: NewManufacturerRequest,
        ) -> CatalogResult<Manufacturer>;
        async fn get_product_manufacturers(
            &self,
            id: &ProductId,
        ) -> CatalogResult<ProductWithManufacturers>;
    }
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let mut products = MockProducts::new();
    products
        .expect_list_products()
        .times(1)
        .returning(|| Err(CatalogError::store("server selection timeout")));

    let (mut state, _) = services();
    state.product_service = Arc::new(products);
    let router = create_router(state, &AppConfig::default());

    let (status, body) = send(&router, Method::GET, "/api/v1/products", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");
}
