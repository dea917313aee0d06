//! Path parameter extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Extractor for path parameters described by a validated struct.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct IdParams {
///     #[validate(length(min = 1, max = 64))]
///     id: String,
/// }
///
/// async fn get_product(ValidatedPath(params): ValidatedPath<IdParams>) -> String {
///     params.id
/// }
/// ```
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedPath(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct CodeParams {
        #[validate(length(max = 4, message = "Code is at most 4 characters"))]
        code: String,
    }

    async fn show(ValidatedPath(params): ValidatedPath<CodeParams>) -> String {
        params.code
    }

    async fn status_for(uri: &str) -> StatusCode {
        Router::new()
            .route("/{code}", get(show))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_path() {
        assert_eq!(status_for("/ab12").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_path_is_422() {
        assert_eq!(
            status_for("/way-too-long").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
