//! Two-step delete confirmation

use lumiere_api::{DeletionMode, EntityId, Resource, ResourceKind};

use crate::notify::Notifier;
use crate::source::CollectionSource;

/// The entity a delete dialog is about, one variant per deletable resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Product(EntityId),
    Batch(EntityId),
    Brand(EntityId),
    Category(EntityId),
    Packaging(EntityId),
    Formulation(EntityId),
    Ingredient(EntityId),
    SkinType(EntityId),
    Tag(EntityId),
    Voucher(EntityId),
    BlogPost(EntityId),
    Question(EntityId),
}

impl DeleteTarget {
    /// Target for `id` of `kind`, or `None` when that resource cannot be deleted
    pub fn new(kind: ResourceKind, id: EntityId) -> Option<Self> {
        Some(match kind {
            ResourceKind::Product => Self::Product(id),
            ResourceKind::Batch => Self::Batch(id),
            ResourceKind::Brand => Self::Brand(id),
            ResourceKind::Category => Self::Category(id),
            ResourceKind::Packaging => Self::Packaging(id),
            ResourceKind::Formulation => Self::Formulation(id),
            ResourceKind::Ingredient => Self::Ingredient(id),
            ResourceKind::SkinType => Self::SkinType(id),
            ResourceKind::Tag => Self::Tag(id),
            ResourceKind::Voucher => Self::Voucher(id),
            ResourceKind::BlogPost => Self::BlogPost(id),
            ResourceKind::Question => Self::Question(id),
            ResourceKind::Order => return None,
        })
    }

    pub fn for_entity<R: Resource>(entity: &R) -> Option<Self> {
        Self::new(R::KIND, entity.id().clone())
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Product(_) => ResourceKind::Product,
            Self::Batch(_) => ResourceKind::Batch,
            Self::Brand(_) => ResourceKind::Brand,
            Self::Category(_) => ResourceKind::Category,
            Self::Packaging(_) => ResourceKind::Packaging,
            Self::Formulation(_) => ResourceKind::Formulation,
            Self::Ingredient(_) => ResourceKind::Ingredient,
            Self::SkinType(_) => ResourceKind::SkinType,
            Self::Tag(_) => ResourceKind::Tag,
            Self::Voucher(_) => ResourceKind::Voucher,
            Self::BlogPost(_) => ResourceKind::BlogPost,
            Self::Question(_) => ResourceKind::Question,
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            Self::Product(id)
            | Self::Batch(id)
            | Self::Brand(id)
            | Self::Category(id)
            | Self::Packaging(id)
            | Self::Formulation(id)
            | Self::Ingredient(id)
            | Self::SkinType(id)
            | Self::Tag(id)
            | Self::Voucher(id)
            | Self::BlogPost(id)
            | Self::Question(id) => id,
        }
    }

    pub fn mode(&self) -> DeletionMode {
        match self {
            Self::Batch(_)
            | Self::Packaging(_)
            | Self::Formulation(_)
            | Self::BlogPost(_)
            | Self::Question(_) => DeletionMode::Hard,
            _ => DeletionMode::Soft,
        }
    }

    /// Endpoint the DELETE is sent to
    pub fn path(&self) -> String {
        let kind = self.kind();
        match self.mode() {
            DeletionMode::Soft => format!("{}/soft-deletion/{}", kind.collection_path(), self.id()),
            DeletionMode::Hard => kind.item_path(self.id()),
        }
    }
}

/// Confirmation prompt for deleting one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    target: DeleteTarget,
    name: String,
}

impl DeleteDialog {
    /// Ask before deleting `entity`; `None` for resources without deletion
    pub fn open<R: Resource>(entity: &R) -> Option<Self> {
        DeleteTarget::for_entity(entity).map(|target| Self {
            target,
            name: entity.display_name().to_string(),
        })
    }

    pub fn target(&self) -> &DeleteTarget {
        &self.target
    }

    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete {} \"{}\"?",
            self.target.kind().label(),
            self.name
        )
    }

    /// Issue the delete. The caller refetches whatever the outcome.
    pub async fn confirm(self, source: &dyn CollectionSource, notifier: &Notifier) -> bool {
        let kind = self.target.kind();
        match source.delete(kind, self.target.id()).await {
            Ok(()) => {
                notifier.success(format!("{} deleted successfully", kind.sentence_label()));
                true
            }
            Err(e) => {
                tracing::warn!("deleting {} {} failed: {e}", kind.label(), self.target.id());
                notifier.error(e.user_message());
                false
            }
        }
    }
}
