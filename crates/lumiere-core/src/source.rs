//! Seams between the core logic and the network
//!
//! Controllers and modals talk to these traits rather than to the HTTP
//! client directly so tests can substitute in-memory backends.

use async_trait::async_trait;
use serde_json::Value;

use lumiere_api::address::{District, Province, Ward};
use lumiere_api::{EntityId, ListResponse, ResourceKind};
use lumiere_client::{AddressClient, HttpClient, ListQuery, Result};

/// CRUD access to resource collections
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn list(&self, kind: ResourceKind, query: &ListQuery) -> Result<ListResponse<Value>>;

    async fn create(&self, kind: ResourceKind, payload: Value) -> Result<Value>;

    async fn update(&self, kind: ResourceKind, id: &EntityId, payload: Value) -> Result<Value>;

    async fn delete(&self, kind: ResourceKind, id: &EntityId) -> Result<()>;
}

#[async_trait]
impl CollectionSource for HttpClient {
    async fn list(&self, kind: ResourceKind, query: &ListQuery) -> Result<ListResponse<Value>> {
        self.list_kind(kind, query).await
    }

    async fn create(&self, kind: ResourceKind, payload: Value) -> Result<Value> {
        self.create_kind(kind, payload).await
    }

    async fn update(&self, kind: ResourceKind, id: &EntityId, payload: Value) -> Result<Value> {
        self.update_kind(kind, id, payload).await
    }

    async fn delete(&self, kind: ResourceKind, id: &EntityId) -> Result<()> {
        self.delete_kind(kind, id).await
    }
}

/// Province → district → ward lookups
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn provinces(&self) -> Result<Vec<Province>>;

    async fn districts(&self, province_code: u32) -> Result<Vec<District>>;

    async fn wards(&self, district_code: u32) -> Result<Vec<Ward>>;
}

#[async_trait]
impl AddressSource for AddressClient {
    async fn provinces(&self) -> Result<Vec<Province>> {
        AddressClient::provinces(self).await
    }

    async fn districts(&self, province_code: u32) -> Result<Vec<District>> {
        AddressClient::districts(self, province_code).await
    }

    async fn wards(&self, district_code: u32) -> Result<Vec<Ward>> {
        AddressClient::wards(self, district_code).await
    }
}
