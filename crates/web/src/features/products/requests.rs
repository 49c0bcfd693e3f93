use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validation::{FieldRule, RequestRules, RuleSet};

lazy_static! {
    static ref PRODUCT_NAME: Regex = Regex::new(r"^[a-zA-Z0-9\s']+$").unwrap();
}

pub const PRICE_MESSAGE: &str = "Price should be a positive number";
pub const QUANTITY_MESSAGE: &str = "Quantity should be a positive number";
pub const EXISTS_MESSAGE: &str = "Exists should be a boolean";

fn id_rule() -> FieldRule {
    FieldRule::new("id")
        .trim()
        .required("Product ID is required")
        .uuid("Invalid product ID format")
}

/// Rules shared by create and update. On create, the caller prepends the
/// presence checks for the required fields.
fn name_rule(rule: FieldRule) -> FieldRule {
    rule.length(3, 60, "Name should be between 3 and 60 characters")
        .matches(
            &PRODUCT_NAME,
            "Name should contain only letters, numbers, spaces, and apostrophes",
        )
}

fn price_rule(rule: FieldRule) -> FieldRule {
    rule.float_min(0.01, PRICE_MESSAGE)
}

fn category_id_rule(rule: FieldRule) -> FieldRule {
    rule.uuid("Invalid category ID format")
}

fn optional_fields(rules: RuleSet) -> RuleSet {
    rules
        .field(
            FieldRule::new("description")
                .optional()
                .trim()
                .length(3, 120, "Description should be between 3 and 120 characters"),
        )
        .field(
            FieldRule::new("currency")
                .optional()
                .trim()
                .length(3, 3, "Currency should be exactly 3 characters"),
        )
        .field(FieldRule::new("quantity").optional().int_min(0, QUANTITY_MESSAGE))
        .field(FieldRule::new("exists").optional().boolean(EXISTS_MESSAGE))
}

#[derive(Debug, Deserialize)]
pub struct ProductId {
    pub id: Uuid,
}

impl RequestRules for ProductId {
    fn rules() -> RuleSet {
        RuleSet::new().field(id_rule())
    }
}

/// Request payload for creating a new product.
///
/// Numeric and boolean fields arrive as JSON scalars or strings and are
/// parsed once validation has passed.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[schema(value_type = f64)]
    pub price: String,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub currency: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub exists: Option<String>,
}

impl RequestRules for CreateProductRequest {
    fn rules() -> RuleSet {
        let rules = RuleSet::new()
            .field(name_rule(
                FieldRule::new("name").trim().required("Name is required"),
            ))
            .field(price_rule(
                FieldRule::new("price").required("Price is required"),
            ))
            .field(category_id_rule(
                FieldRule::new("categoryId").required("Category ID is required"),
            ));

        optional_fields(rules)
    }
}

/// Request payload for updating a product; every field is optional
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<String>,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub currency: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub exists: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub body: UpdateProductBody,
}

impl RequestRules for UpdateProductRequest {
    fn rules() -> RuleSet {
        let rules = RuleSet::new()
            .field(id_rule())
            .field(name_rule(FieldRule::new("name").optional().trim()))
            .field(price_rule(FieldRule::new("price").optional()))
            .field(category_id_rule(FieldRule::new("categoryId").optional()));

        optional_fields(rules)
    }
}
