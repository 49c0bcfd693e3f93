use storage::{
    dto::category::NewCategory,
    error::Result,
    models::{Category, CategoryDetail},
    store::CategoryStore,
};
use uuid::Uuid;

use super::requests::CreateCategoryRequest;
use crate::sanitize::escape_html;

/// Build the write payload for a new category, sanitizing its name
pub fn new_category(request: CreateCategoryRequest) -> NewCategory {
    NewCategory {
        name: escape_html(&request.name),
        parent_id: request.parent_id,
    }
}

/// List all categories
pub async fn list_categories(store: &dyn CategoryStore) -> Result<Vec<Category>> {
    store.list().await
}

/// Get a category with its parent
pub async fn get_category(store: &dyn CategoryStore, id: Uuid) -> Result<CategoryDetail> {
    store.find_by_id(id).await
}

/// Create a new category
pub async fn create_category(store: &dyn CategoryStore, new: &NewCategory) -> Result<Category> {
    store.create(new).await
}

/// Rename a category; `name` must already be sanitized
pub async fn rename_category(store: &dyn CategoryStore, id: Uuid, name: &str) -> Result<Category> {
    store.rename(id, name).await
}

/// Delete a category
pub async fn delete_category(store: &dyn CategoryStore, id: Uuid) -> Result<()> {
    store.delete(id).await
}
