//! Request payloads as the backend expects them, with their field rules
//!
//! [`validate`](super::validate) deserializes the parsed form into one of
//! these and runs [`Validate`] before anything is sent. Messages are appended
//! to the field label ("Name is required").

use serde::{Deserialize, Deserializer};
use validator::Validate;

use lumiere_api::EntityId;
use lumiere_api::content::Answer;

/// Empty text reads as missing so `required` applies to it
fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Categories, packaging, formulations, skin types and tags
#[derive(Debug, Deserialize, Validate)]
pub struct NamedForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: String,
}

/// Brands and ingredients
#[derive(Debug, Deserialize, Validate)]
pub struct OriginForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub origin: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: String,
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be greater than 0")
    )]
    pub price: Option<i64>,
    #[validate(range(min = 0, max = 1_000_000, message = "must be between 0 and 1000000"))]
    pub stock: Option<i64>,
    #[validate(required(message = "is required"))]
    pub brand_id: Option<EntityId>,
    #[validate(required(message = "is required"))]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub skin_type_ids: Vec<EntityId>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 50, message = "must be at most 50 characters")
    )]
    pub code: Option<String>,
    #[validate(required(message = "is required"))]
    pub product_id: Option<EntityId>,
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be greater than 0")
    )]
    pub quantity: Option<i64>,
    pub manufactured_on: Option<String>,
    #[validate(required(message = "is required"))]
    pub expires_on: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VoucherForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 30, message = "must be at most 30 characters")
    )]
    pub code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: String,
    #[validate(
        required(message = "is required"),
        range(min = 1, max = 100, message = "must be between 1 and 100")
    )]
    pub discount_percent: Option<i64>,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub max_discount: Option<i64>,
    #[validate(
        required(message = "is required"),
        range(min = 0, max = 1_000_000, message = "must be between 0 and 1000000")
    )]
    pub points_required: Option<i64>,
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be greater than 0")
    )]
    pub quantity: Option<i64>,
    #[validate(required(message = "is required"))]
    pub status: Option<String>,
    pub expires_on: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BlogPostForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(required(message = "is required"))]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published: Option<bool>,
}

/// Staff only move orders through their lifecycle
#[derive(Debug, Deserialize, Validate)]
pub struct OrderForm {
    #[validate(required(message = "is required"))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuestionForm {
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "is required"),
        length(max = 300, message = "must be at most 300 characters")
    )]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub answers: Vec<Answer>,
}
