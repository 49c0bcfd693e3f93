//! In-memory store and request helpers for handler tests.
//!
//! `MemoryStore` mirrors the constraint behavior of the PostgreSQL schema:
//! unique names, the product → category foreign key and the restricted
//! delete of referenced categories.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use serde_json::Value;
use storage::{
    dto::{
        category::NewCategory,
        product::{NewProduct, ProductChanges},
    },
    error::{Result, StorageError},
    models::{Category, CategoryDetail, CategoryRef, Product},
    store::{CategoryStore, ProductStore},
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{routes, state::AppState};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Number of store calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of mutating store calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn product_count(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }

    fn read(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn unique(constraint: &str) -> StorageError {
    StorageError::UniqueViolation(constraint.to_string())
}

fn category_ref(tables: &Tables, id: Uuid) -> Result<CategoryRef> {
    tables
        .categories
        .iter()
        .find(|c| c.id == id)
        .map(CategoryRef::from)
        .ok_or_else(|| StorageError::ForeignKeyViolation("products_category_id_fkey".to_string()))
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        self.read();
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<CategoryDetail> {
        self.read();
        let tables = self.tables.lock().unwrap();
        let category = tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;

        let parent = category
            .parent_id
            .and_then(|parent_id| tables.categories.iter().find(|c| c.id == parent_id))
            .map(CategoryRef::from);

        Ok(CategoryDetail {
            id: category.id,
            name: category.name.clone(),
            parent,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }

    async fn create(&self, new: &NewCategory) -> Result<Category> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        if tables.categories.iter().any(|c| c.name == new.name) {
            return Err(unique("categories_name_key"));
        }
        let parent_missing = new
            .parent_id
            .is_some_and(|parent_id| !tables.categories.iter().any(|c| c.id == parent_id));
        if parent_missing {
            return Err(StorageError::ForeignKeyViolation(
                "categories_parent_id_fkey".to_string(),
            ));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            parent_id: new.parent_id,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());

        Ok(category)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Category> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        let current = tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;
        if current.name == name {
            return Err(unique("categories_name_key"));
        }
        if tables.categories.iter().any(|c| c.id != id && c.name == name) {
            return Err(unique("categories_name_key"));
        }

        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;
        category.name = name.to_string();
        category.updated_at = Utc::now();
        let renamed = category.clone();

        for product in tables.products.iter_mut().filter(|p| p.category.id == id) {
            product.category.name = renamed.name.clone();
        }

        Ok(renamed)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        if !tables.categories.iter().any(|c| c.id == id) {
            return Err(StorageError::NotFound);
        }
        if tables.products.iter().any(|p| p.category.id == id) {
            return Err(StorageError::ForeignKeyViolation(
                "products_category_id_fkey".to_string(),
            ));
        }

        tables.categories.retain(|c| c.id != id);
        for category in tables.categories.iter_mut() {
            if category.parent_id == Some(id) {
                category.parent_id = None;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>> {
        self.read();
        Ok(self.tables.lock().unwrap().products.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        self.read();
        self.tables
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, new: &NewProduct) -> Result<Product> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        if tables.products.iter().any(|p| p.name == new.name) {
            return Err(unique("products_name_key"));
        }
        let category = category_ref(&tables, new.category_id)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            price: new.price,
            description: new.description.clone(),
            currency: new.currency.clone(),
            quantity: new.quantity.unwrap_or(0),
            exists: new.exists.unwrap_or(true),
            category,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());

        Ok(product)
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        if !tables.products.iter().any(|p| p.id == id) {
            return Err(StorageError::NotFound);
        }
        let name_taken = changes
            .name
            .as_ref()
            .is_some_and(|name| tables.products.iter().any(|p| p.id != id && &p.name == name));
        if name_taken {
            return Err(unique("products_name_key"));
        }
        let category = changes
            .category_id
            .map(|category_id| category_ref(&tables, category_id))
            .transpose()?;

        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::NotFound)?;

        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(category) = category {
            product.category = category;
        }
        if let Some(description) = &changes.description {
            product.description = Some(description.clone());
        }
        if let Some(currency) = &changes.currency {
            product.currency = Some(currency.clone());
        }
        if let Some(quantity) = changes.quantity {
            product.quantity = quantity;
        }
        if let Some(exists) = changes.exists {
            product.exists = exists;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.write();
        let mut tables = self.tables.lock().unwrap();

        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

pub fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (routes::router(AppState::new(store.clone())), store)
}

/// Sends one request through the router and decodes the JSON response body.
/// Empty bodies decode to `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|json| json.to_string());
    send_raw(app, method, uri, body.as_deref()).await
}

/// Like [`send`], with the request body passed through verbatim.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header("content-type", "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
