//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{AppError, to_camel_case};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{borrow::Cow, collections::HashSet};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// JSON extractor with automatic validation.
///
/// Deserializes the body (serde defaults are applied here) and then runs the
/// `Validate` rules, collecting every failing field. When a field has the
/// wrong type, each top-level field is checked on its own so the 422 lists
/// every type mismatch (code `type`) together with the rule violations of
/// the remaining fields. Bodies that are not JSON reject with 422
/// `INVALID_JSON`.
///
/// Field-by-field reporting needs every field of `T` to tolerate being
/// absent (`Option` or `#[serde(default)]`); otherwise the serde message is
/// returned as `INVALID_JSON`.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateSchool {
///     #[serde(default)]
///     #[validate(length(min = 1, message = "Name is required"))]
///     name: String,
/// }
///
/// async fn create_school(ValidatedJson(payload): ValidatedJson<CreateSchool>) -> String {
///     format!("Creating school: {}", payload.name)
/// }
///
/// let app = Router::new().route("/schools", post(create_school));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        match serde_json::from_value::<T>(value.clone()) {
            Ok(data) => {
                data.validate()?;
                Ok(ValidatedJson(data))
            }
            Err(err) => Err(field_errors::<T>(value, err)),
        }
    }
}

/// Re-check a body that failed typed deserialization one field at a time.
fn field_errors<T>(value: Value, err: serde_json::Error) -> AppError
where
    T: DeserializeOwned + Validate,
{
    let fallback = || AppError::InvalidJson(err.to_string());

    let Value::Object(mut fields) = value else {
        return fallback();
    };
    if serde_json::from_value::<T>(Value::Object(Map::new())).is_err() {
        return fallback();
    }

    let mut errors = ValidationErrors::new();
    let mut mistyped = HashSet::new();
    let keys: Vec<String> = fields.keys().cloned().collect();

    for key in keys {
        let Some(field) = fields.get(&key).cloned() else {
            continue;
        };
        let single = Value::Object(Map::from_iter([(key.clone(), field.clone())]));
        if let Err(e) = serde_json::from_value::<T>(single) {
            fields.remove(&key);
            let mut error = ValidationError::new("type")
                .with_message(Cow::Owned(format!("{key} has the wrong type: {e}")));
            error.add_param(Cow::Borrowed("value"), &field);
            errors
                .errors_mut()
                .insert(Cow::Owned(key.clone()), ValidationErrorsKind::Field(vec![error]));
            mistyped.insert(key);
        }
    }

    if errors.is_empty() {
        return fallback();
    }

    match serde_json::from_value::<T>(Value::Object(fields)) {
        Ok(rest) => {
            if let Err(rule_errors) = rest.validate() {
                for (field, kind) in rule_errors.into_errors() {
                    if !mistyped.contains(&to_camel_case(&field)) {
                        errors.errors_mut().insert(field, kind);
                    }
                }
            }
        }
        Err(_) => return fallback(),
    }

    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct CreateThing {
        #[serde(default)]
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[serde(default)]
        #[validate(length(min = 2, message = "Short name needs two characters"))]
        short_name: String,
    }

    async fn create(ValidatedJson(input): ValidatedJson<CreateThing>) -> String {
        input.name
    }

    fn app() -> Router {
        Router::new().route("/", post(create))
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let (status, _) = send(r#"{"name":"Widget","shortName":"wd"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let (status, body) = send("{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["shortName"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_422() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_wrong_type_is_reported_per_field() {
        let (status, body) = send(r#"{"name": 42}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["name"][0]["code"], "type");
        assert_eq!(body["details"]["name"][0]["params"]["value"], 42);
        assert_eq!(body["details"]["shortName"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_every_wrong_type_is_listed() {
        let (status, body) = send(r#"{"name": 5, "shortName": ["a"]}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"]["name"][0]["code"], "type");
        assert_eq!(body["details"]["shortName"][0]["code"], "type");
        assert_eq!(body["details"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_object_body_is_invalid_json() {
        let (status, body) = send("[1, 2]").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "INVALID_JSON");
    }
}
