use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validation::{FieldRule, RequestRules, RuleSet};

lazy_static! {
    static ref CATEGORY_NAME: Regex = Regex::new(r"^[a-zA-Z0-9\s]+$").unwrap();
}

fn id_rule() -> FieldRule {
    FieldRule::new("id")
        .trim()
        .required("Category ID is required")
        .uuid("Invalid category ID format")
}

fn name_rule() -> FieldRule {
    FieldRule::new("name")
        .trim()
        .required("Name is required")
        .length(3, 60, "Name should be between 3 and 60 characters")
        .matches(
            &CATEGORY_NAME,
            "Name should contain only letters, numbers, and spaces",
        )
}

#[derive(Debug, Deserialize)]
pub struct CategoryId {
    pub id: Uuid,
}

impl RequestRules for CategoryId {
    fn rules() -> RuleSet {
        RuleSet::new().field(id_rule())
    }
}

/// Request payload for creating a new category
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_id: Option<Uuid>,
}

impl RequestRules for CreateCategoryRequest {
    fn rules() -> RuleSet {
        RuleSet::new().field(name_rule()).field(
            FieldRule::new("parentId")
                .optional()
                .trim()
                .uuid("Invalid parent category ID format"),
        )
    }
}

/// Request payload for renaming a category
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameCategoryBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameCategoryRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub body: RenameCategoryBody,
}

impl RequestRules for RenameCategoryRequest {
    fn rules() -> RuleSet {
        RuleSet::new().field(id_rule()).field(name_rule())
    }
}
