//! HTTP client for the Lumiere backend

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use lumiere_api::account::{LoginRequest, LoginResponse, Profile, ProfileUpdate};
use lumiere_api::{ErrorBody, Resource};

use crate::error::{ClientError, Result};
use crate::resource::ResourceClient;
use crate::session::Session;

/// Body of an outgoing request
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// File uploads; reqwest supplies the multipart boundary
    Multipart(Form),
}

/// Per-request overrides
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers applied after the defaults, replacing them on conflict
    pub headers: HeaderMap,
}

/// HTTP client for communicating with the Lumiere backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub(crate) client: Client,
    base_url: Url,
    session: Session,
}

impl HttpClient {
    /// Create a new HTTP client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    ///
    /// # Example
    /// ```no_run
    /// use lumiere_client::{HttpClient, Session};
    ///
    /// let client = HttpClient::new("http://localhost:5000", Session::new())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>, session: Session) -> Result<Self> {
        Self::with_client(base_url, session, Client::new())
    }

    /// Create a new HTTP client with custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, session: Session, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a full URL from a path
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform a request against `path` and return the parsed JSON body.
    ///
    /// Empty 2xx bodies yield `Value::Null`.
    ///
    /// # Errors
    /// `ClientError::Api` for non-2xx statuses, `ClientError::Transport` when
    /// the backend cannot be reached, `ClientError::Json` for malformed bodies.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<Value> {
        let url = self.url(path)?;
        self.send(method, url, body, options).await
    }

    /// Perform a request against an already built URL
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<Value> {
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        if !options.headers.is_empty() {
            builder = builder.headers(options.headers);
        }

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(%method, %url, "request failed: {e}");
        })?;

        tracing::debug!(%method, %url, status = response.status().as_u16(), "response received");
        read_response(response).await
    }

    /// Perform a GET request and deserialize the response
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .request(Method::GET, path, RequestBody::Empty, RequestOptions::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a POST request with JSON body
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: impl Serialize) -> Result<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        let value = self
            .request(Method::POST, path, body, RequestOptions::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a PUT request with JSON body
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: impl Serialize) -> Result<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        let value = self
            .request(Method::PUT, path, body, RequestOptions::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a DELETE request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::DELETE, path, RequestBody::Empty, RequestOptions::default())
            .await?;
        Ok(())
    }

    // Auth endpoints

    /// Sign in and store the returned token in the session
    ///
    /// # Errors
    /// Returns an error if the credentials are rejected or the request fails.
    ///
    /// # Example
    /// ```no_run
    /// # use lumiere_client::{HttpClient, Session};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000", Session::new())?;
    /// let token = client.login("staff@lumiere.vn", "secret").await?;
    /// assert!(client.session().is_authenticated());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/api/auth/login", request).await?;
        self.session.set_token(response.token.clone());
        tracing::info!("signed in as {email}");
        Ok(response.token)
    }

    /// Forget the session token
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("signed out");
    }

    // Account endpoints

    /// Get the signed-in customer's profile
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn profile(&self) -> Result<Profile> {
        self.get("/api/account/profile").await
    }

    /// Update the signed-in customer's profile
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend returns an error.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.put("/api/account/profile", update).await
    }

    // Resource endpoints

    /// Typed access to one resource collection
    ///
    /// # Example
    /// ```no_run
    /// # use lumiere_client::{HttpClient, Session};
    /// # use lumiere_api::catalog::Brand;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000", Session::new())?;
    /// let brands = client.resource::<Brand>()
    ///     .list()
    ///     .page(1)
    ///     .page_size(10)
    ///     .name("acme")
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.clone())
    }
}

/// Turn a response into JSON, mapping non-2xx statuses to `ClientError::Api`
pub(crate) async fn read_response(response: Response) -> Result<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = error_message(&bytes).unwrap_or_else(|| fallback_message(status));
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract the server-provided message from an error body
fn error_message(bytes: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::String(text)) => Some(text).filter(|t| !t.trim().is_empty()),
        Ok(value @ Value::Object(_)) => serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(ErrorBody::into_message),
        Ok(_) => None,
        Err(_) => {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
    }
}

fn fallback_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}
