use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson, ValidatedPath,
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
    },
};
use domain_catalog_core::{IdParams, MessageResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SchoolResult;
use crate::models::{School, CreateSchool, UpdateSchool};
use crate::repository::SchoolRepository;
use crate::service::SchoolService;

pub const TAG: &str = "schools";

/// OpenAPI documentation for Schools API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_schools,
        create_school,
        get_school,
        update_school,
        delete_school,
    ),
    components(
        schemas(School, CreateSchool, UpdateSchool, MessageResponse),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "School directory management")
    )
)]
pub struct ApiDoc;

/// Create the school router with all HTTP endpoints
pub fn router<R: SchoolRepository + 'static>(service: SchoolService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_schools).post(create_school))
        .route(
            "/{id}",
            get(get_school)
                .patch(update_school)
                .delete(delete_school),
        )
        .with_state(shared_service)
}

/// List schools, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All schools", body = Vec<School>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_schools<R: SchoolRepository>(
    State(service): State<Arc<SchoolService<R>>>,
) -> SchoolResult<Json<Vec<School>>> {
    let schools = service.list_schools().await?;
    Ok(Json(schools))
}

/// Create a school
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSchool,
    responses(
        (status = 201, description = "School created", body = School),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_school<R: SchoolRepository>(
    State(service): State<Arc<SchoolService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSchool>,
) -> SchoolResult<impl IntoResponse> {
    let school = service.create_school(input).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

/// Get a school by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(IdParams),
    responses(
        (status = 200, description = "School found", body = School),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_school<R: SchoolRepository>(
    State(service): State<Arc<SchoolService<R>>>,
    ValidatedPath(params): ValidatedPath<IdParams>,
) -> SchoolResult<Json<School>> {
    let school = service.get_school(&params.id).await?;
    Ok(Json(school))
}

/// Update a school
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(IdParams),
    request_body = UpdateSchool,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_school<R: SchoolRepository>(
    State(service): State<Arc<SchoolService<R>>>,
    ValidatedPath(params): ValidatedPath<IdParams>,
    ValidatedJson(input): ValidatedJson<UpdateSchool>,
) -> SchoolResult<Json<School>> {
    let school = service.update_school(&params.id, input).await?;
    Ok(Json(school))
}

/// Delete a school
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(IdParams),
    responses(
        (status = 200, description = "School deleted", body = MessageResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_school<R: SchoolRepository>(
    State(service): State<Arc<SchoolService<R>>>,
    ValidatedPath(params): ValidatedPath<IdParams>,
) -> SchoolResult<Json<MessageResponse>> {
    service.delete_school(&params.id).await?;
    Ok(Json(MessageResponse::new("School deleted successfully")))
}
