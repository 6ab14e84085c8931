//! The catalogue of administrable resources

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::EntityId;

/// Every resource type exposed by the backend under `/api/{segment}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Product,
    Batch,
    Brand,
    Category,
    Packaging,
    Formulation,
    Ingredient,
    SkinType,
    Tag,
    Voucher,
    BlogPost,
    Order,
    Question,
}

/// Where pagination happens for a resource's list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Backend honours `PageNumber`/`PageSize`/`Name` and returns a page
    Server,
    /// Backend returns the whole collection, sliced locally
    Client,
}

/// How a resource is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionMode {
    /// `DELETE /api/{segment}/{id}`
    Hard,
    /// `DELETE /api/{segment}/soft-deletion/{id}`
    Soft,
}

/// Unknown resource name
#[derive(Debug, Clone, Error)]
#[error("unknown resource: {0}")]
pub struct ParseKindError(pub String);

impl ResourceKind {
    pub const ALL: [Self; 13] = [
        Self::Product,
        Self::Batch,
        Self::Brand,
        Self::Category,
        Self::Packaging,
        Self::Formulation,
        Self::Ingredient,
        Self::SkinType,
        Self::Tag,
        Self::Voucher,
        Self::BlogPost,
        Self::Order,
        Self::Question,
    ];

    /// Path segment under `/api`
    pub fn segment(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Batch => "batch",
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Packaging => "packaging",
            Self::Formulation => "formulation",
            Self::Ingredient => "ingredient",
            Self::SkinType => "skin-type",
            Self::Tag => "tag",
            Self::Voucher => "voucher",
            Self::BlogPost => "blog",
            Self::Order => "order",
            Self::Question => "question",
        }
    }

    /// Lowercase singular name used in prompts ("Delete brand ...?")
    pub fn label(self) -> &'static str {
        match self {
            Self::SkinType => "skin type",
            Self::BlogPost => "blog post",
            Self::Question => "quiz question",
            other => other.segment(),
        }
    }

    /// [`label`](Self::label) with an upper-case first letter, for toasts
    pub fn sentence_label(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Screen title
    pub fn title(self) -> &'static str {
        match self {
            Self::Product => "Products",
            Self::Batch => "Batches",
            Self::Brand => "Brands",
            Self::Category => "Categories",
            Self::Packaging => "Packaging",
            Self::Formulation => "Formulations",
            Self::Ingredient => "Ingredients",
            Self::SkinType => "Skin types",
            Self::Tag => "Tags",
            Self::Voucher => "Vouchers",
            Self::BlogPost => "Blog",
            Self::Order => "Orders",
            Self::Question => "Skin quiz",
        }
    }

    pub fn collection_path(self) -> String {
        format!("/api/{}", self.segment())
    }

    pub fn item_path(self, id: &EntityId) -> String {
        format!("/api/{}/{id}", self.segment())
    }

    /// Path used to remove an entity, `None` when the resource cannot be deleted
    pub fn deletion_path(self, id: &EntityId) -> Option<String> {
        match self.deletion()? {
            DeletionMode::Hard => Some(self.item_path(id)),
            DeletionMode::Soft => Some(format!("/api/{}/soft-deletion/{id}", self.segment())),
        }
    }

    /// Rows per page; product and skin type screens show 20
    pub fn page_size(self) -> usize {
        match self {
            Self::Product | Self::SkinType => 20,
            _ => 10,
        }
    }

    pub fn pagination(self) -> PaginationMode {
        match self {
            Self::Product | Self::Voucher | Self::Order | Self::BlogPost => PaginationMode::Server,
            _ => PaginationMode::Client,
        }
    }

    pub fn deletion(self) -> Option<DeletionMode> {
        match self {
            Self::Order => None,
            Self::Product
            | Self::Brand
            | Self::Category
            | Self::Ingredient
            | Self::SkinType
            | Self::Tag
            | Self::Voucher => Some(DeletionMode::Soft),
            Self::Batch
            | Self::Packaging
            | Self::Formulation
            | Self::BlogPost
            | Self::Question => Some(DeletionMode::Hard),
        }
    }

    /// Whether staff may upload an image for this resource
    pub fn accepts_image(self) -> bool {
        matches!(self, Self::Product | Self::BlogPost)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.segment() == needle
                    || kind.label().replace(' ', "-") == needle
                    || kind.title().to_lowercase().replace(' ', "-") == needle
            })
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let id = EntityId::Number(5);
        assert_eq!(ResourceKind::Voucher.collection_path(), "/api/voucher");
        assert_eq!(ResourceKind::SkinType.item_path(&id), "/api/skin-type/5");
        assert_eq!(
            ResourceKind::Tag.deletion_path(&id).as_deref(),
            Some("/api/tag/soft-deletion/5")
        );
        assert_eq!(
            ResourceKind::Batch.deletion_path(&id).as_deref(),
            Some("/api/batch/5")
        );
        assert_eq!(ResourceKind::Order.deletion_path(&id), None);
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(ResourceKind::Product.page_size(), 20);
        assert_eq!(ResourceKind::SkinType.page_size(), 20);
        assert_eq!(ResourceKind::Brand.page_size(), 10);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("brand".parse::<ResourceKind>().unwrap(), ResourceKind::Brand);
        assert_eq!(
            "skin_type".parse::<ResourceKind>().unwrap(),
            ResourceKind::SkinType
        );
        assert_eq!(
            "Blog-Post".parse::<ResourceKind>().unwrap(),
            ResourceKind::BlogPost
        );
        assert_eq!(
            "categories".parse::<ResourceKind>().unwrap(),
            ResourceKind::Category
        );
        assert!("widgets".parse::<ResourceKind>().is_err());
    }
}
