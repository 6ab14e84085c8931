//! The contract every listable entity satisfies

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::EntityId;
use crate::kind::ResourceKind;

/// A backend entity that can be listed, searched and mutated
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Resource type this entity belongs to
    const KIND: ResourceKind;

    fn id(&self) -> &EntityId;

    /// Human readable name shown in tables and prompts
    fn display_name(&self) -> &str;

    /// Text fields matched by the list search box
    fn search_text(&self) -> Vec<&str>;
}

/// Implements `Resource` for entities whose search covers `name` and
/// `description` plus any extra optional text fields.
macro_rules! named_resource {
    ($ty:ty, $kind:expr $(, $extra:ident)*) => {
        impl $crate::resource::Resource for $ty {
            const KIND: $crate::kind::ResourceKind = $kind;

            fn id(&self) -> &$crate::id::EntityId {
                &self.id
            }

            fn display_name(&self) -> &str {
                &self.name
            }

            fn search_text(&self) -> Vec<&str> {
                #[allow(unused_mut)]
                let mut fields = vec![self.name.as_str(), self.description.as_str()];
                $(
                    if let Some(value) = self.$extra.as_deref() {
                        fields.push(value);
                    }
                )*
                fields
            }
        }
    };
}

pub(crate) use named_resource;
