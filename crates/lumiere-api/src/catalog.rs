//! Product catalogue entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::ResourceKind;
use crate::resource::{Resource, named_resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in whole VND
    pub price: u64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub skin_type_ids: Vec<EntityId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(Product, ResourceKind::Product);

/// A manufactured lot of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: EntityId,
    pub code: String,
    pub product_id: EntityId,
    pub quantity: u32,
    #[serde(default)]
    pub manufactured_on: Option<NaiveDate>,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl Resource for Batch {
    const KIND: ResourceKind = ResourceKind::Batch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.code
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.code.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Country of origin
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(Brand, ResourceKind::Brand, origin);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(Category, ResourceKind::Category);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packaging {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

named_resource!(Packaging, ResourceKind::Packaging);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formulation {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

named_resource!(Formulation, ResourceKind::Formulation);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(Ingredient, ResourceKind::Ingredient, origin);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinType {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(SkinType, ResourceKind::SkinType);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_deleted: bool,
}

named_resource!(Tag, ResourceKind::Tag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_search_includes_origin() {
        let brand: Brand = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Acme",
            "description": "desc",
            "origin": "Korea"
        }))
        .unwrap();
        assert_eq!(brand.search_text(), vec!["Acme", "desc", "Korea"]);
        assert!(!brand.is_deleted);
    }

    #[test]
    fn test_product_defaults() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p-1",
            "name": "Toner",
            "price": 250000
        }))
        .unwrap();
        assert_eq!(product.stock, 0);
        assert!(product.skin_type_ids.is_empty());
        assert_eq!(product.search_text(), vec!["Toner", ""]);
    }

    #[test]
    fn test_batch_dates() {
        let batch: Batch = serde_json::from_value(serde_json::json!({
            "id": 3,
            "code": "LOT-7",
            "productId": 1,
            "quantity": 40,
            "expiresOn": "2027-01-31"
        }))
        .unwrap();
        assert_eq!(batch.expires_on, NaiveDate::from_ymd_opt(2027, 1, 31));
        assert_eq!(batch.manufactured_on, None);
    }
}
