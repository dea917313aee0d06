use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum SchoolError {
    #[error("School not found: {0}")]
    NotFound(String),

    #[error("School with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SchoolResult<T> = Result<T, SchoolError>;

impl SchoolError {
    pub fn from_database(err: DatabaseError, slug: &str) -> Self {
        match err {
            DatabaseError::UniqueViolation(_) => SchoolError::DuplicateSlug(slug.to_string()),
            DatabaseError::RecordNotFound(what) => SchoolError::NotFound(what),
            other => SchoolError::Internal(other.to_string()),
        }
    }
}

impl From<DatabaseError> for SchoolError {
    fn from(err: DatabaseError) -> Self {
        SchoolError::Internal(err.to_string())
    }
}

impl From<SchoolError> for AppError {
    fn from(err: SchoolError) -> Self {
        match err {
            SchoolError::NotFound(id) => AppError::NotFound(format!("School {id} not found")),
            SchoolError::DuplicateSlug(slug) => {
                AppError::Conflict(format!("School with slug '{slug}' already exists"))
            }
            SchoolError::Validation(errors) => AppError::ValidationError(errors),
            SchoolError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SchoolError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
