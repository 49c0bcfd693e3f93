use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::CategoryRef;

/// Product as returned by the API: the owning category is embedded and the
/// raw `category_id` column never leaves the storage crate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub quantity: i32,
    pub exists: bool,
    pub category: CategoryRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
