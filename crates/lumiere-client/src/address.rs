//! Client for the public province/district/ward dataset

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use lumiere_api::address::{District, Province, Ward};

use crate::error::{ClientError, Result};
use crate::http::read_response;

/// Default host of the open administrative-division API
pub const DEFAULT_ADDRESS_URL: &str = "https://provinces.open-api.vn";

/// Unauthenticated client for the address dataset.
///
/// Never attaches the session token; the dataset is a third party.
#[derive(Debug, Clone)]
pub struct AddressClient {
    client: Client,
    base_url: Url,
}

impl AddressClient {
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url.as_ref())?,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).map_err(ClientError::Url)?;
        tracing::debug!(%url, "fetching address data");
        let response = self.client.get(url).send().await?;
        Ok(serde_json::from_value(read_response(response).await?)?)
    }

    /// All provinces, without nested districts
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn provinces(&self) -> Result<Vec<Province>> {
        self.get("/api/p/").await
    }

    /// Districts of one province
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn districts(&self, province_code: u32) -> Result<Vec<District>> {
        let province: Province = self.get(&format!("/api/p/{province_code}?depth=2")).await?;
        Ok(province.districts)
    }

    /// Wards of one district
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn wards(&self, district_code: u32) -> Result<Vec<Ward>> {
        let district: District = self.get(&format!("/api/d/{district_code}?depth=2")).await?;
        Ok(district.wards)
    }
}
