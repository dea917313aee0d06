//! Welcome page listing the available endpoints.
//!
//! Browsers get HTML; clients sending `Accept: application/json` get the
//! same listing as JSON.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use axum_helpers::server::{OPENAPI_JSON_PATH, SCALAR_PATH, SWAGGER_UI_PATH};
use core_config::AppInfo;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const fn endpoint(method: &'static str, path: &'static str, description: &'static str) -> Endpoint {
    Endpoint {
        method,
        path,
        description,
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/health", "Liveness check"),
    endpoint("GET", "/ready", "Readiness check (database)"),
    endpoint("GET", OPENAPI_JSON_PATH, "OpenAPI document"),
    endpoint("GET", SWAGGER_UI_PATH, "Swagger UI"),
    endpoint("GET", SCALAR_PATH, "Scalar API reference"),
    endpoint("GET", "/api/products", "List products"),
    endpoint("POST", "/api/products", "Create a product"),
    endpoint("GET", "/api/products/{id}", "Get a product"),
    endpoint("PATCH", "/api/products/{id}", "Update a product"),
    endpoint("DELETE", "/api/products/{id}", "Delete a product"),
    endpoint("GET", "/api/schools", "List schools"),
    endpoint("POST", "/api/schools", "Create a school"),
    endpoint("GET", "/api/schools/{id}", "Get a school"),
    endpoint("PATCH", "/api/schools/{id}", "Update a school"),
    endpoint("DELETE", "/api/schools/{id}", "Delete a school"),
    endpoint("GET", "/api/categories", "List active categories"),
    endpoint("POST", "/api/categories", "Create a category"),
    endpoint("GET", "/api/categories/{id}", "Get a category"),
    endpoint("PATCH", "/api/categories/{id}", "Update a category"),
    endpoint("DELETE", "/api/categories/{id}", "Deactivate a category"),
];

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
    pub endpoints: &'static [Endpoint],
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

fn render_html(app: &AppInfo) -> String {
    let rows: String = ENDPOINTS
        .iter()
        .map(|e| {
            format!(
                "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>",
                e.method, e.path, e.description
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name}</title>
</head>
<body>
<h1>Welcome to {name} v{version}</h1>
<p>Interactive docs: <a href="{swagger}">Swagger UI</a> · <a href="{scalar}">Scalar</a> · <a href="{openapi}">OpenAPI JSON</a></p>
<table>
<thead><tr><th>Method</th><th>Path</th><th>Description</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</body>
</html>"#,
        name = app.name,
        version = app.version,
        swagger = SWAGGER_UI_PATH,
        scalar = SCALAR_PATH,
        openapi = OPENAPI_JSON_PATH,
    )
}

pub async fn welcome_handler(State(app): State<AppInfo>, headers: HeaderMap) -> Response {
    if wants_json(&headers) {
        Json(WelcomeResponse {
            name: app.name,
            version: app.version,
            docs: SWAGGER_UI_PATH,
            endpoints: ENDPOINTS,
        })
        .into_response()
    } else {
        Html(render_html(&app)).into_response()
    }
}
