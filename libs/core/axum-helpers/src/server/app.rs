use crate::errors::AppError;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{HttpConfig, RateLimitError, apply_rate_limit, create_cors_layer, security_headers};
use super::shutdown::ShutdownCoordinator;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
};
use core_config::server::ServerConfig;
use std::any::Any;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const SCALAR_PATH: &str = "/scalar";

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

/// Creates the application router with middleware and documentation.
///
/// - OpenAPI document at `/api-docs/openapi.json`, Swagger UI at
///   `/swagger-ui`, Scalar at `/scalar`
/// - `apis` nested under `/api`; `root` merged at the top level (health,
///   welcome page)
/// - JSON 404/405 fallbacks
///
/// Layers, outermost first: compression, CORS, security headers, panic
/// catcher, rate limit, body limit, request tracing. Domain routers apply
/// their own state before being passed in.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", domain_products::handlers::router(service));
/// let router = create_router::<ApiDoc>(api_routes, Router::new(), &HttpConfig::default())?;
/// ```
pub fn create_router<T>(apis: Router, root: Router, http: &HttpConfig) -> Result<Router, RouterError>
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Scalar::with_url(SCALAR_PATH, T::openapi()))
        .merge(root)
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(DefaultBodyLimit::max(http.body_limit_bytes));

    let router = apply_rate_limit(router, &http.rate_limit)?
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(http.allowed_origins.clone()))
        .layer(CompressionLayer::new());

    info!(
        origins = ?http.allowed_origins,
        body_limit_bytes = http.body_limit_bytes,
        "Router assembled"
    );

    Ok(router)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::InternalServerError(format!("handler panicked: {detail}")).into_response()
}

/// Serve `router` until SIGINT/SIGTERM, then drain and run `cleanup`.
///
/// In-flight requests get `shutdown_timeout` to finish before open
/// connections are dropped; `cleanup` (closing the database pool) gets the
/// same budget afterwards. Peer addresses are exposed through `ConnectInfo`
/// for the rate limiter.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let signal_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let server = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { signal_handle.wait_for_signal().await });

    let drain_deadline = async {
        coordinator.wait_for_shutdown().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let serve_result = tokio::select! {
        result = server.into_future() => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = drain_deadline => {
            warn!("Connections still open after {:?}, dropping them", shutdown_timeout);
            Ok(())
        }
    };

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ValidatedJson;
    use crate::http::RateLimitConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        routing::{get, post},
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API", version = "0.0.1"))]
    struct TestDoc;

    #[derive(Deserialize, Validate)]
    struct Note {
        #[validate(length(min = 1))]
        text: String,
    }

    async fn echo(ValidatedJson(note): ValidatedJson<Note>) -> String {
        note.text
    }

    async fn boom() -> &'static str {
        panic!("database exploded at 10.0.0.5")
    }

    fn test_router() -> Router {
        let apis = Router::new()
            .route("/notes", post(echo))
            .route("/boom", get(boom));
        let root = Router::new().route("/", get(|| async { "welcome" }));
        let http = HttpConfig {
            body_limit_bytes: 64,
            rate_limit: RateLimitConfig {
                per_second: 100,
                burst: 100,
                trust_proxy_headers: false,
            },
            ..HttpConfig::default()
        };
        create_router::<TestDoc>(apis, root, &http).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = test_router()
            .oneshot(get_request(OPENAPI_JSON_PATH))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc = json_body(response).await;
        assert_eq!(doc["info"]["title"], "Test API");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = test_router()
            .oneshot(get_request("/api/nothing-here"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = json_body(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        let response = test_router()
            .oneshot(get_request("/api/notes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = json_body(response).await;
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_500() {
        let response = test_router().oneshot(get_request("/api/boom")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn test_body_over_limit_is_413() {
        let payload = format!(r#"{{"text":"{}"}}"#, "x".repeat(200));
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notes")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = json_body(response).await;
        assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_frontend_origin() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/notes")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_root_routes_are_merged() {
        let response = test_router().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
