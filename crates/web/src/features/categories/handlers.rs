use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::common::{ApiResponse, MessageResponse},
    error::StorageError,
    models::{Category, CategoryDetail},
};

use super::{
    requests::{CategoryId, CreateCategoryRequest, RenameCategoryBody, RenameCategoryRequest},
    services,
};
use crate::{
    error::{WebError, WebResult},
    sanitize::escape_html,
    state::AppState,
    validation::{Validated, ValidationFailure},
};

const NOT_FOUND: &str = "Category not found!";

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List all categories", body = ApiResponse<Vec<Category>>),
        (status = 500, description = "Internal error", body = MessageResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> WebResult<Response> {
    let categories = services::list_categories(state.categories.as_ref())
        .await
        .map_err(|e| WebError::internal("Internal server error while fetching categories", e))?;

    Ok(Json(ApiResponse::new("Categories fetched successfully", categories)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetail>),
        (status = 404, description = "Category not found", body = MessageResponse),
        (status = 422, description = "Invalid category ID", body = ValidationFailure)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Validated(CategoryId { id }): Validated<CategoryId>,
) -> WebResult<Response> {
    let category = services::get_category(state.categories.as_ref(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            other => WebError::internal("Internal server error while fetching category", other),
        })?;

    Ok(Json(ApiResponse::new("Category fetched successfully", category)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<Category>),
        (status = 400, description = "Parent category not found", body = MessageResponse),
        (status = 409, description = "Name already exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationFailure)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Validated(req): Validated<CreateCategoryRequest>,
) -> WebResult<Response> {
    let new = services::new_category(req);

    let category = services::create_category(state.categories.as_ref(), &new)
        .await
        .map_err(|e| match e {
            StorageError::UniqueViolation(_) => {
                WebError::Conflict(format!("'{}' category already exists", new.name))
            }
            StorageError::ForeignKeyViolation(_) => {
                WebError::BadRequest("Parent category not found!".to_string())
            }
            other => WebError::internal("Internal server error while creating category", other),
        })?;

    tracing::info!(category_id = %category.id, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Category created successfully", category)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Category ID")
    ),
    request_body = RenameCategoryBody,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<Category>),
        (status = 404, description = "Category not found", body = MessageResponse),
        (status = 409, description = "Name already exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationFailure)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Validated(req): Validated<RenameCategoryRequest>,
) -> WebResult<Response> {
    let name = escape_html(&req.body.name);

    let category = services::rename_category(state.categories.as_ref(), req.id, &name)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            StorageError::UniqueViolation(_) => {
                WebError::Conflict(format!("Category with name '{}' already exists!", name))
            }
            other => WebError::internal("Internal server error while updating category", other),
        })?;

    Ok(Json(ApiResponse::new("Category updated successfully", category)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found", body = MessageResponse),
        (status = 422, description = "Invalid category ID", body = ValidationFailure)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Validated(CategoryId { id }): Validated<CategoryId>,
) -> WebResult<Response> {
    services::delete_category(state.categories.as_ref(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            other => WebError::internal("Internal server error while deleting category", other),
        })?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
