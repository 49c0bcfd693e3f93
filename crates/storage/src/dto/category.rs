use uuid::Uuid;

/// Write payload for a new category. `name` is expected to be sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: Option<Uuid>,
}
