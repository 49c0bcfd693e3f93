use uuid::Uuid;

/// Write payload for a new product.
///
/// Optional fields left as `None` fall back to the column defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
    pub exists: Option<bool>,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
    pub exists: Option<bool>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.currency.is_none()
            && self.quantity.is_none()
            && self.exists.is_none()
    }
}
