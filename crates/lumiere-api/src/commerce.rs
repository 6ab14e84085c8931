//! Vouchers and orders

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::ResourceKind;
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VoucherStatus {
    #[default]
    Active,
    Inactive,
    Expired,
    #[serde(other)]
    Unknown,
}

impl VoucherStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Expired => "Expired",
            Self::Unknown => "Unknown",
        }
    }
}

/// A discount customers redeem with loyalty points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// Percentage taken off the order total
    pub discount_percent: u8,
    /// Upper bound of the discount in VND, if any
    #[serde(default)]
    pub max_discount: Option<u64>,
    /// Loyalty points needed to redeem
    pub points_required: u32,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub status: VoucherStatus,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Resource for Voucher {
    const KIND: ResourceKind = ResourceKind::Voucher;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.code
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipping,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipping => "Shipping",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Order total in VND
    pub total: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Order {
    const KIND: ResourceKind = ResourceKind::Order;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.customer_name
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.customer_name.as_str(),
            self.phone.as_str(),
            self.status.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_tolerated() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 9,
            "customerName": "Lan",
            "status": "Refunded",
            "total": 120000
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.search_text()[2], "Unknown");
    }

    #[test]
    fn test_voucher_wire_names() {
        let voucher: Voucher = serde_json::from_value(serde_json::json!({
            "id": 1,
            "code": "GLOW10",
            "discountPercent": 10,
            "maxDiscount": 50000,
            "pointsRequired": 200
        }))
        .unwrap();
        assert_eq!(voucher.status, VoucherStatus::Active);
        assert_eq!(voucher.max_discount, Some(50_000));
    }
}
