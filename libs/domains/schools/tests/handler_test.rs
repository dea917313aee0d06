//! Handler tests for Schools domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_schools::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = SchoolService::new(InMemorySchoolRepository::new());
    Router::new().nest("/schools", handlers::router(service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_crud_round() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/schools",
        Some(json!({ "name": "Riverside High School", "logo": "riverside.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "riverside-high-school");
    assert_eq!(created["logo"], "riverside.png");

    let uri = format!("/schools/{}", created["id"].as_str().unwrap());

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "name": "Riverside Academy" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "riverside-academy");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "School deleted successfully");

    let (status, list) = send(&app, "GET", "/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_same_name_twice_conflicts() {
    let app = app();
    let payload = json!({ "name": "Hillcrest" });

    let (first, _) = send(&app, "POST", "/schools", Some(payload.clone())).await;
    let (second, body) = send(&app, "POST", "/schools", Some(payload)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1008);
}

#[tokio::test]
async fn test_missing_name_returns_422() {
    let app = app();

    let (status, body) = send(&app, "POST", "/schools", Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/schools/not-a-real-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
