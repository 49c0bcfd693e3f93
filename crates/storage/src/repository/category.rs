use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::category::NewCategory;
use crate::error::{Result, StorageError};
use crate::models::{Category, CategoryDetail, CategoryRef};

#[derive(FromRow)]
struct CategoryDetailRow {
    id: Uuid,
    name: String,
    parent_id: Option<Uuid>,
    parent_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryDetailRow> for CategoryDetail {
    fn from(row: CategoryDetailRow) -> Self {
        let parent = match (row.parent_id, row.parent_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            parent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, parent_id, created_at, updated_at
            FROM categories
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Find a category by ID, with its parent resolved
    pub async fn find_by_id(&self, id: Uuid) -> Result<CategoryDetail> {
        let row = sqlx::query_as::<_, CategoryDetailRow>(
            r#"
            SELECT c.id, c.name, c.parent_id, p.name AS parent_name,
                   c.created_at, c.updated_at
            FROM categories c
            LEFT JOIN categories p ON p.id = c.parent_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(CategoryDetail::from(row))
    }

    /// Create a new category
    pub async fn create(&self, new: &NewCategory) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id)
            VALUES ($1, $2)
            RETURNING id, name, parent_id, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.parent_id)
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    /// Rename a category in a single conditional statement.
    ///
    /// The row is only written when its name actually changes. When nothing
    /// is written the category either already carries `name` (reported as a
    /// unique violation) or does not exist.
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Category> {
        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, updated_at = now()
            WHERE id = $1 AND name <> $2
            RETURNING id, name, parent_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        if let Some(category) = updated {
            return Ok(category);
        }

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if exists {
            Err(StorageError::UniqueViolation("categories_name_key".to_string()))
        } else {
            Err(StorageError::NotFound)
        }
    }

    /// Delete a category by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
