use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::common::{ApiResponse, MessageResponse},
    error::StorageError,
    models::Product,
};

use super::{
    requests::{CreateProductRequest, ProductId, UpdateProductBody, UpdateProductRequest},
    services,
};
use crate::{
    error::{WebError, WebResult},
    state::AppState,
    validation::{Validated, ValidationFailure},
};

const NOT_FOUND: &str = "Product not found!";
const CATEGORY_NOT_FOUND: &str = "Category not found!";

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List all products with their category", body = ApiResponse<Vec<Product>>),
        (status = 500, description = "Internal error", body = MessageResponse)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> WebResult<Response> {
    let products = services::list_products(state.products.as_ref())
        .await
        .map_err(|e| WebError::internal("Internal server error while fetching products", e))?;

    Ok(Json(ApiResponse::new("Products fetched successfully", products)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 422, description = "Invalid product ID", body = ValidationFailure)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Validated(ProductId { id }): Validated<ProductId>,
) -> WebResult<Response> {
    let product = services::get_product(state.products.as_ref(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            other => WebError::internal("Internal server error while fetching product", other),
        })?;

    Ok(Json(ApiResponse::new("Product fetched successfully", product)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<Product>),
        (status = 400, description = "Category not found", body = MessageResponse),
        (status = 409, description = "Name already exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationFailure)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Validated(req): Validated<CreateProductRequest>,
) -> WebResult<Response> {
    let new = services::new_product(req).map_err(|e| WebError::Validation(vec![e]))?;

    let product = services::create_product(state.products.as_ref(), &new)
        .await
        .map_err(|e| match e {
            StorageError::UniqueViolation(_) => {
                WebError::Conflict(format!("'{}' product already exists", new.name))
            }
            StorageError::ForeignKeyViolation(_) => {
                WebError::BadRequest(CATEGORY_NOT_FOUND.to_string())
            }
            other => WebError::internal("Internal server error while creating product", other),
        })?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Product created successfully", product)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, description = "Category not found", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 409, description = "Name already exists", body = MessageResponse),
        (status = 422, description = "Validation error or nothing to update")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Validated(req): Validated<UpdateProductRequest>,
) -> WebResult<Response> {
    let changes = services::product_changes(req.body).map_err(|e| WebError::Validation(vec![e]))?;

    if changes.is_empty() {
        return Err(WebError::Unprocessable(
            "No data provided to update".to_string(),
        ));
    }

    tracing::debug!(product_id = %req.id, ?changes, "Updating product");

    let product = services::update_product(state.products.as_ref(), req.id, &changes)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            StorageError::UniqueViolation(_) => WebError::Conflict(format!(
                "'{}' product already exists",
                changes.name.as_deref().unwrap_or_default()
            )),
            StorageError::ForeignKeyViolation(_) => {
                WebError::BadRequest(CATEGORY_NOT_FOUND.to_string())
            }
            other => WebError::internal("Internal server error while updating product", other),
        })?;

    Ok(Json(ApiResponse::new("Product updated successfully", product)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 422, description = "Invalid product ID", body = ValidationFailure)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Validated(ProductId { id }): Validated<ProductId>,
) -> WebResult<Response> {
    services::delete_product(state.products.as_ref(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(NOT_FOUND.to_string()),
            other => WebError::internal("Internal server error while deleting product", other),
        })?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
