use storage::{
    dto::product::{NewProduct, ProductChanges},
    error::Result,
    models::Product,
    store::ProductStore,
};
use uuid::Uuid;

use super::requests::{
    CreateProductRequest, EXISTS_MESSAGE, PRICE_MESSAGE, QUANTITY_MESSAGE, UpdateProductBody,
};
use crate::sanitize::escape_html;
use crate::validation::{
    FieldError,
    parse::{parse_flag, parse_float, parse_int},
};

fn price(raw: &str) -> std::result::Result<f64, FieldError> {
    parse_float(raw).ok_or_else(|| FieldError::new("price", PRICE_MESSAGE))
}

fn quantity(raw: &str) -> std::result::Result<i32, FieldError> {
    parse_int(raw).ok_or_else(|| FieldError::new("quantity", QUANTITY_MESSAGE))
}

fn flag(raw: &str) -> std::result::Result<bool, FieldError> {
    parse_flag(raw).ok_or_else(|| FieldError::new("exists", EXISTS_MESSAGE))
}

/// Build the insert payload: text is sanitized, numbers and the flag parsed,
/// and optional fields included only when supplied
pub fn new_product(request: CreateProductRequest) -> std::result::Result<NewProduct, FieldError> {
    Ok(NewProduct {
        name: escape_html(&request.name),
        price: price(&request.price)?,
        category_id: request.category_id,
        description: request.description.as_deref().map(escape_html),
        currency: request.currency.as_deref().map(escape_html),
        quantity: request.quantity.as_deref().map(quantity).transpose()?,
        exists: request.exists.as_deref().map(flag).transpose()?,
    })
}

/// Build a partial update holding only the fields present in the request
pub fn product_changes(body: UpdateProductBody) -> std::result::Result<ProductChanges, FieldError> {
    Ok(ProductChanges {
        name: body.name.as_deref().map(escape_html),
        price: body.price.as_deref().map(price).transpose()?,
        category_id: body.category_id,
        description: body.description.as_deref().map(escape_html),
        currency: body.currency.as_deref().map(escape_html),
        quantity: body.quantity.as_deref().map(quantity).transpose()?,
        exists: body.exists.as_deref().map(flag).transpose()?,
    })
}

/// List all products
pub async fn list_products(store: &dyn ProductStore) -> Result<Vec<Product>> {
    store.list().await
}

/// Get a product by ID
pub async fn get_product(store: &dyn ProductStore, id: Uuid) -> Result<Product> {
    store.find_by_id(id).await
}

/// Create a new product
pub async fn create_product(store: &dyn ProductStore, new: &NewProduct) -> Result<Product> {
    store.create(new).await
}

/// Apply a non-empty set of changes to a product
pub async fn update_product(
    store: &dyn ProductStore,
    id: Uuid,
    changes: &ProductChanges,
) -> Result<Product> {
    store.update(id, changes).await
}

/// Delete a product
pub async fn delete_product(store: &dyn ProductStore, id: Uuid) -> Result<()> {
    store.delete(id).await
}
