//! lumiere-client: HTTP client library
//!
//! Remote collection accessor for the Lumiere storefront backend. Every
//! request carries the bearer token of the injected [`Session`]; non-2xx
//! responses become [`ClientError::Api`] with the server's message, network
//! failures become [`ClientError::Transport`]. Nothing is retried or cached.
//!
//! # Examples
//!
//! ```no_run
//! use lumiere_api::catalog::Brand;
//! use lumiere_client::{HttpClient, Session};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:5000", Session::new())?;
//!
//! client.login("staff@lumiere.vn", "secret").await?;
//!
//! // Create, list, delete
//! let brands = client.resource::<Brand>();
//! brands.create(&serde_json::json!({ "name": "Acme", "description": "desc" })).await?;
//! let page = brands.list().page(1).page_size(10).send().await?;
//! brands.delete(&5.into()).await?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod error;
pub mod http;
pub mod resource;
pub mod session;

pub use address::{AddressClient, DEFAULT_ADDRESS_URL};
pub use error::{ClientError, Result};
pub use http::{HttpClient, RequestBody, RequestOptions};
pub use resource::{ListQuery, ListRequest, ResourceClient};
pub use session::Session;
