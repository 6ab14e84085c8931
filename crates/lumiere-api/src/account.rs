//! Authentication and customer account types

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Delivery address as stored on the profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub province_code: u32,
    pub province_name: String,
    pub district_code: u32,
    pub district_name: String,
    pub ward_code: u32,
    pub ward_name: String,
    #[serde(default)]
    pub street: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: EntityId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Loyalty points balance
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ShippingAddress>,
}
