use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::product::{NewProduct, ProductChanges};
use crate::error::{Result, StorageError};
use crate::models::{CategoryRef, Product};

#[derive(FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: f64,
    description: Option<String>,
    currency: Option<String>,
    quantity: i32,
    #[sqlx(rename = "in_stock")]
    exists: bool,
    category_id: Uuid,
    category_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            currency: row.currency,
            quantity: row.quantity,
            exists: row.exists,
            category: CategoryRef {
                id: row.category_id,
                name: row.category_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for Product database operations.
///
/// Every query joins the owning category so callers always get the embedded
/// `{id, name}` reference.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products
    pub async fn list(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.id, p.name, p.price, p.description, p.currency, p.quantity, p.in_stock,
                   p.category_id, c.name AS category_name, p.created_at, p.updated_at
            FROM products p
            JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at, p.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.id, p.name, p.price, p.description, p.currency, p.quantity, p.in_stock,
                   p.category_id, c.name AS category_name, p.created_at, p.updated_at
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(Product::from(row))
    }

    /// Create a new product
    pub async fn create(&self, new: &NewProduct) -> Result<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            WITH inserted AS (
                INSERT INTO products (name, price, category_id, description, currency, quantity, in_stock)
                VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, TRUE))
                RETURNING *
            )
            SELECT i.id, i.name, i.price, i.description, i.currency, i.quantity, i.in_stock,
                   i.category_id, c.name AS category_name, i.created_at, i.updated_at
            FROM inserted i
            JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.category_id)
        .bind(new.description.as_deref())
        .bind(new.currency.as_deref())
        .bind(new.quantity)
        .bind(new.exists)
        .fetch_one(self.pool)
        .await?;

        Ok(Product::from(row))
    }

    /// Apply a partial update; `None` fields keep their stored value
    pub async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            WITH updated AS (
                UPDATE products
                SET name = COALESCE($2, name),
                    price = COALESCE($3, price),
                    category_id = COALESCE($4, category_id),
                    description = COALESCE($5, description),
                    currency = COALESCE($6, currency),
                    quantity = COALESCE($7, quantity),
                    in_stock = COALESCE($8, in_stock),
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.name, u.price, u.description, u.currency, u.quantity, u.in_stock,
                   u.category_id, c.name AS category_name, u.created_at, u.updated_at
            FROM updated u
            JOIN categories c ON c.id = u.category_id
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.price)
        .bind(changes.category_id)
        .bind(changes.description.as_deref())
        .bind(changes.currency.as_deref())
        .bind(changes.quantity)
        .bind(changes.exists)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(Product::from(row))
    }

    /// Delete a product by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
