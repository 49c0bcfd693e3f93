//! Persistence seam consumed by the web layer.
//!
//! Handlers only see these traits, so the HTTP contract can be exercised
//! against any implementation. `Database` is the PostgreSQL one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::dto::category::NewCategory;
use crate::dto::product::{NewProduct, ProductChanges};
use crate::error::Result;
use crate::models::{Category, CategoryDetail, Product};
use crate::repository::{category::CategoryRepository, product::ProductRepository};

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;

    /// Returns `Err(StorageError::NotFound)` if the category doesn't exist.
    async fn find_by_id(&self, id: Uuid) -> Result<CategoryDetail>;

    /// Fails with `UniqueViolation` on a duplicate name and
    /// `ForeignKeyViolation` on an unknown parent.
    async fn create(&self, new: &NewCategory) -> Result<Category>;

    /// Renaming to the current name is a `UniqueViolation` and writes nothing.
    async fn rename(&self, id: Uuid, name: &str) -> Result<Category>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Product>;

    /// Fails with `ForeignKeyViolation` when `category_id` is unknown.
    async fn create(&self, new: &NewProduct) -> Result<Product>;

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
impl CategoryStore for Database {
    async fn list(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(self.pool()).list().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<CategoryDetail> {
        CategoryRepository::new(self.pool()).find_by_id(id).await
    }

    async fn create(&self, new: &NewCategory) -> Result<Category> {
        CategoryRepository::new(self.pool()).create(new).await
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Category> {
        CategoryRepository::new(self.pool()).rename(id, name).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        CategoryRepository::new(self.pool()).delete(id).await
    }
}

#[async_trait]
impl ProductStore for Database {
    async fn list(&self) -> Result<Vec<Product>> {
        ProductRepository::new(self.pool()).list().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        ProductRepository::new(self.pool()).find_by_id(id).await
    }

    async fn create(&self, new: &NewProduct) -> Result<Product> {
        ProductRepository::new(self.pool()).create(new).await
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product> {
        ProductRepository::new(self.pool()).update(id, changes).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        ProductRepository::new(self.pool()).delete(id).await
    }
}
