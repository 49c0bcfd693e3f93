use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::test_support::{app, send};

async fn create(app: &axum::Router, name: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/categories", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn test_create_then_duplicate_conflicts() {
    let (app, _) = app();

    let created = create(&app, "Books").await;
    assert_eq!(created["name"], "Books");
    assert!(created["id"].is_string());

    let (status, body) = send(&app, "POST", "/api/categories", Some(json!({ "name": "Books" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["msg"], "'Books' category already exists");
}

#[tokio::test]
async fn test_list_wraps_data_in_envelope() {
    let (app, _) = app();
    create(&app, "Books").await;
    create(&app, "Music").await;

    let (status, body) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Categories fetched successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (app, store) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "a!", "parentId": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["msg"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[0]["message"], "Name should be between 3 and 60 characters");
    assert_eq!(errors[1]["field"], "parentId");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_create_with_missing_name() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/api/categories", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["msg"][0]["message"], "Name is required");
}

#[tokio::test]
async fn test_create_with_unknown_parent() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Poetry", "parentId": "00000000-0000-4000-8000-000000000000" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Parent category not found!");
}

#[tokio::test]
async fn test_get_embeds_parent() {
    let (app, _) = app();
    let parent = create(&app, "Books").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Poetry", "parentId": parent["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/api/categories/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parent"]["id"], parent["id"]);
    assert_eq!(body["data"]["parent"]["name"], "Books");
}

#[tokio::test]
async fn test_malformed_id_never_reaches_store() {
    let (app, store) = app();

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/api/categories/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"][0]["field"], "id");
        assert_eq!(body["msg"][0]["message"], "Invalid category ID format");
    }

    let (status, _) = send(
        &app,
        "PUT",
        "/api/categories/not-a-uuid",
        Some(json!({ "name": "Books" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (app, _) = app();
    let uri = "/api/categories/00000000-0000-4000-8000-000000000000";

    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Category not found!");

    let (status, _) = send(&app, "PUT", uri, Some(json!({ "name": "Books" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename() {
    let (app, _) = app();
    let created = create(&app, "Books").await;
    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "Novels" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Category updated successfully");
    assert_eq!(body["data"]["name"], "Novels");
}

#[tokio::test]
async fn test_rename_to_same_name_conflicts() {
    let (app, _) = app();
    let created = create(&app, "Books").await;
    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "Books" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["msg"], "Category with name 'Books' already exists!");

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"]["name"], "Books");
    assert_eq!(body["data"]["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_rename_to_taken_name_conflicts() {
    let (app, _) = app();
    create(&app, "Books").await;
    let music = create(&app, "Music").await;
    let uri = format!("/api/categories/{}", music["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "name": "Books" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (app, _) = app();
    let created = create(&app, "Books").await;
    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_referenced_category_is_internal_error() {
    let (app, _) = app();
    let created = create(&app, "Books").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Dune", "price": 9.5, "categoryId": created["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Internal server error while deleting category");

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_names_are_pattern_checked_and_trimmed() {
    let (app, _) = app();

    // Rejected by the pattern before any escaping happens.
    let (status, _) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "<script>" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let created = create(&app, "  Garden Tools  ").await;
    assert_eq!(created["name"], "Garden Tools");
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Route not found");
}
