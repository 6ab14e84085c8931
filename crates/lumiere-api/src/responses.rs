//! Response types for the API

use serde::{Deserialize, Serialize};

/// One page of a resource collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePage<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> ResourcePage<T> {
    /// Convert every item, failing on the first error
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<ResourcePage<U>, E> {
        Ok(ResourcePage {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total_pages: self.total_pages,
            total_items: self.total_items,
        })
    }
}

/// Body of a list endpoint: some endpoints page server-side, others
/// return the whole collection as a bare array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(ResourcePage<T>),
    Plain(Vec<T>),
}

/// Error payload returned with non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most specific non-empty message the server sent
    pub fn into_message(self) -> Option<String> {
        [self.message, self.error, self.title]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_shapes() {
        let paged: ListResponse<u32> =
            serde_json::from_value(json!({"items": [1, 2], "totalPages": 3, "totalItems": 22}))
                .unwrap();
        assert_eq!(
            paged,
            ListResponse::Paged(ResourcePage {
                items: vec![1, 2],
                total_pages: 3,
                total_items: 22
            })
        );

        let plain: ListResponse<u32> = serde_json::from_value(json!([4, 5])).unwrap();
        assert_eq!(plain, ListResponse::Plain(vec![4, 5]));
    }

    #[test]
    fn test_error_body_message_preference() {
        let body: ErrorBody =
            serde_json::from_value(json!({"title": "Bad Request", "message": "Name is taken"}))
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Name is taken"));

        let blank: ErrorBody = serde_json::from_value(json!({"message": "  "})).unwrap();
        assert_eq!(blank.into_message(), None);
    }
}
