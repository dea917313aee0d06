pub mod health;
pub mod welcome;

use axum::{Router, routing::get};
use axum_helpers::server::{RouterError, create_router, health_router};
use domain_categories::{CategoryService, PgCategoryRepository, handlers as category_handlers};
use domain_products::{PgProductRepository, ProductService, handlers as product_handlers};
use domain_schools::{PgSchoolRepository, SchoolService, handlers as school_handlers};

use crate::{openapi::ApiDoc, state::AppState};

/// Resource routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let schools = SchoolService::new(PgSchoolRepository::new(state.db.clone()));
    let categories = CategoryService::new(PgCategoryRepository::new(state.db.clone()));

    Router::new()
        .nest("/products", product_handlers::router(products))
        .nest("/schools", school_handlers::router(schools))
        .nest("/categories", category_handlers::router(categories))
}

/// Welcome page, liveness and readiness at the top level.
fn root_router(state: &AppState) -> Router {
    Router::new()
        .route("/", get(welcome::welcome_handler))
        .with_state(state.config.app)
        .merge(health_router(state.config.app))
        .merge(
            Router::new()
                .route("/ready", get(health::ready_handler))
                .with_state(state.clone()),
        )
}

/// Full application: resources, docs, operational routes and middleware.
pub fn build_router(state: &AppState) -> Result<Router, RouterError> {
    create_router::<ApiDoc>(routes(state), root_router(state), &state.config.http)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use axum_helpers::HttpConfig;
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn config() -> Config {
        Config {
            app: app_info!(),
            environment: Environment::Test,
            server: ServerConfig::default(),
            database: PostgresConfig::default(),
            http: HttpConfig::default(),
            run_migrations: false,
        }
    }

    fn app_with(db: MockDatabase) -> Router {
        let state = AppState::new(config(), db.into_connection());
        build_router(&state).unwrap()
    }

    fn app() -> Router {
        app_with(MockDatabase::new(DatabaseBackend::Postgres))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_welcome_page_is_html_by_default() {
        let response = app().oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("/api/categories"));
        assert!(html.contains("/swagger-ui"));
    }

    #[tokio::test]
    async fn test_welcome_page_negotiates_json() {
        let request = Request::builder()
            .uri("/")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "catalog_api");
        assert!(body["endpoints"].as_array().unwrap().len() >= 20);
    }

    #[tokio::test]
    async fn test_health_reports_name_and_version() {
        let response = app().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "catalog_api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            BTreeMap::from([("?column?", sea_orm::Value::Int(Some(1)))]),
        ]]);
        let response = app_with(db).oneshot(get_request("/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())]);
        let response = app_with(db).oneshot(get_request("/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_resources() {
        let response = app()
            .oneshot(get_request("/api-docs/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["info"]["title"], "Catalog API");
        assert!(body["paths"]["/products"].is_object());
        assert!(body["paths"]["/schools/{id}"].is_object());
        assert!(body["paths"]["/categories/{id}"]["patch"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404_with_security_headers() {
        let response = app().oneshot(get_request("/api/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        let body = json_body(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_long_unknown_id_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, sea_orm::Value>>::new()]);
        let uri = format!("/api/products/{}", "x".repeat(200));
        let response = app_with(db).oneshot(get_request(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
