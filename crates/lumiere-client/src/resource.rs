//! Collection endpoints shared by every resource

use std::marker::PhantomData;
use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use lumiere_api::{EntityId, ListResponse, Resource, ResourceKind};

use crate::error::{ClientError, Result};
use crate::http::{HttpClient, RequestBody, RequestOptions};

/// Query parameters understood by list endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub name: Option<String>,
    pub is_deleted: Option<bool>,
    pub status: Option<String>,
}

impl ListQuery {
    /// Append the backend's PascalCase query parameters to `url`
    pub fn apply(&self, url: &mut Url) {
        let mut query = url.query_pairs_mut();
        if let Some(page) = self.page {
            query.append_pair("PageNumber", &page.to_string());
        }
        if let Some(page_size) = self.page_size {
            query.append_pair("PageSize", &page_size.to_string());
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            query.append_pair("Name", name);
        }
        if let Some(is_deleted) = self.is_deleted {
            query.append_pair("IsDeleted", if is_deleted { "true" } else { "false" });
        }
        if let Some(status) = &self.status {
            query.append_pair("Status", status);
        }
    }
}

impl HttpClient {
    /// List a collection as raw JSON
    ///
    /// # Errors
    /// Returns an error if the request fails, the backend returns an error or
    /// the body is neither a page nor an array.
    pub async fn list_kind(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> Result<ListResponse<Value>> {
        let mut url = self.url(&kind.collection_path())?;
        query.apply(&mut url);
        let value = self
            .send(Method::GET, url, RequestBody::Empty, RequestOptions::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch one entity as raw JSON
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn get_kind(&self, kind: ResourceKind, id: &EntityId) -> Result<Value> {
        self.get(&kind.item_path(id)).await
    }

    /// `POST /api/{segment}`
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn create_kind(&self, kind: ResourceKind, payload: Value) -> Result<Value> {
        let value = self
            .request(
                Method::POST,
                &kind.collection_path(),
                RequestBody::Json(payload),
                RequestOptions::default(),
            )
            .await?;
        tracing::info!("created {}", kind.label());
        Ok(value)
    }

    /// `PUT /api/{segment}/{id}`
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn update_kind(
        &self,
        kind: ResourceKind,
        id: &EntityId,
        payload: Value,
    ) -> Result<Value> {
        let value = self
            .request(
                Method::PUT,
                &kind.item_path(id),
                RequestBody::Json(payload),
                RequestOptions::default(),
            )
            .await?;
        tracing::info!("updated {} {id}", kind.label());
        Ok(value)
    }

    /// Remove an entity, soft or hard depending on the resource
    ///
    /// # Errors
    /// `ClientError::Unsupported` when the resource cannot be deleted, or an
    /// error if the request fails.
    pub async fn delete_kind(&self, kind: ResourceKind, id: &EntityId) -> Result<()> {
        let path = kind.deletion_path(id).ok_or_else(|| {
            ClientError::Unsupported(format!("{} records cannot be deleted", kind.label()))
        })?;
        self.delete(&path).await?;
        tracing::info!("deleted {} {id}", kind.label());
        Ok(())
    }

    /// Upload an image file as `multipart/form-data` to `/api/{segment}/{id}/image`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the resource takes no
    /// images, or the request fails.
    pub async fn upload_kind_image(
        &self,
        kind: ResourceKind,
        id: &EntityId,
        file: &Path,
    ) -> Result<Value> {
        if !kind.accepts_image() {
            return Err(ClientError::Unsupported(format!(
                "{} records have no image",
                kind.label()
            )));
        }

        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        self.request(
            Method::POST,
            &format!("{}/image", kind.item_path(id)),
            RequestBody::Multipart(form),
            RequestOptions::default(),
        )
        .await
    }
}

/// Typed access to the collection of `R`
#[derive(Debug, Clone)]
pub struct ResourceClient<R> {
    http: HttpClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self {
            http,
            _marker: PhantomData,
        }
    }

    /// Start a list request
    #[must_use]
    pub fn list(&self) -> ListRequest<R> {
        ListRequest {
            http: self.http.clone(),
            query: ListQuery::default(),
            _marker: PhantomData,
        }
    }

    /// Get a single entity by id
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn get(&self, id: &EntityId) -> Result<R> {
        Ok(serde_json::from_value(self.http.get_kind(R::KIND, id).await?)?)
    }

    /// Create an entity
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn create(&self, payload: &impl Serialize) -> Result<Value> {
        self.http
            .create_kind(R::KIND, serde_json::to_value(payload)?)
            .await
    }

    /// Update an entity
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn update(&self, id: &EntityId, payload: &impl Serialize) -> Result<Value> {
        self.http
            .update_kind(R::KIND, id, serde_json::to_value(payload)?)
            .await
    }

    /// Delete an entity
    ///
    /// # Errors
    /// Returns an error if the resource cannot be deleted or the request fails.
    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.http.delete_kind(R::KIND, id).await
    }

    /// Attach an image file to an entity
    ///
    /// # Errors
    /// Returns an error if `R` takes no images, the file is unreadable or the
    /// request fails.
    pub async fn upload_image(&self, id: &EntityId, file: &Path) -> Result<Value> {
        self.http.upload_kind_image(R::KIND, id, file).await
    }
}

/// Builder for listing a collection with filters
#[derive(Debug, Clone)]
pub struct ListRequest<R> {
    http: HttpClient,
    query: ListQuery,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> ListRequest<R> {
    /// Set page number (1-indexed)
    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.query.page = Some(page);
        self
    }

    /// Set items per page
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.query.page_size = Some(page_size);
        self
    }

    /// Filter by name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.query.name = Some(name.into());
        self
    }

    /// Include or only show soft-deleted records
    #[must_use]
    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.query.is_deleted = Some(is_deleted);
        self
    }

    /// Filter by status (orders, vouchers)
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.query.status = Some(status.into());
        self
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn send(self) -> Result<ListResponse<R>> {
        let raw = self.http.list_kind(R::KIND, &self.query).await?;
        Ok(match raw {
            ListResponse::Paged(page) => {
                ListResponse::Paged(page.try_map(serde_json::from_value)?)
            }
            ListResponse::Plain(items) => ListResponse::Plain(
                items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<std::result::Result<_, _>>()?,
            ),
        })
    }
}
