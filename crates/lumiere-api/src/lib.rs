//! lumiere-api: Shared API types
//!
//! Wire types exchanged with the Lumiere storefront backend: entity
//! identifiers, the catalogue of administrable resources, entity payloads,
//! paged list responses, and account/auth requests. Used by the client,
//! the core list/mutation logic, the CLI and the TUI.

pub mod account;
pub mod address;
pub mod catalog;
pub mod commerce;
pub mod content;
pub mod id;
pub mod kind;
pub mod resource;
pub mod responses;

pub use id::EntityId;
pub use kind::{DeletionMode, PaginationMode, ParseKindError, ResourceKind};
pub use resource::Resource;
pub use responses::{ErrorBody, ListResponse, ResourcePage};
