//! Dependent province → district → ward selection

use std::sync::Arc;

use lumiere_api::account::ShippingAddress;
use lumiere_api::address::{District, Province, Ward};

use crate::notify::Notifier;
use crate::source::AddressSource;

/// Three chained selectors; choosing a level resets everything below it
pub struct AddressSelector {
    source: Arc<dyn AddressSource>,
    notifier: Notifier,
    provinces: Vec<Province>,
    districts: Vec<District>,
    wards: Vec<Ward>,
    province: Option<Province>,
    district: Option<District>,
    ward: Option<Ward>,
}

impl AddressSelector {
    pub fn new(source: Arc<dyn AddressSource>, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            provinces: Vec::new(),
            districts: Vec::new(),
            wards: Vec::new(),
            province: None,
            district: None,
            ward: None,
        }
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    pub fn province(&self) -> Option<&Province> {
        self.province.as_ref()
    }

    pub fn district(&self) -> Option<&District> {
        self.district.as_ref()
    }

    pub fn ward(&self) -> Option<&Ward> {
        self.ward.as_ref()
    }

    pub async fn load_provinces(&mut self) {
        match self.source.provinces().await {
            Ok(provinces) => self.provinces = provinces,
            Err(e) => {
                tracing::warn!("failed to load provinces: {e}");
                self.notifier.error(e.user_message());
            }
        }
    }

    /// Choose a province, clear district and ward, then load its districts
    pub async fn select_province(&mut self, province: Province) {
        self.district = None;
        self.ward = None;
        self.districts.clear();
        self.wards.clear();

        let code = province.code;
        self.province = Some(province);
        match self.source.districts(code).await {
            Ok(districts) => self.districts = districts,
            Err(e) => {
                tracing::warn!("failed to load districts of {code}: {e}");
                self.notifier.error(e.user_message());
            }
        }
    }

    /// Choose a district, clear the ward, then load its wards
    pub async fn select_district(&mut self, district: District) {
        self.ward = None;
        self.wards.clear();

        let code = district.code;
        self.district = Some(district);
        match self.source.wards(code).await {
            Ok(wards) => self.wards = wards,
            Err(e) => {
                tracing::warn!("failed to load wards of {code}: {e}");
                self.notifier.error(e.user_message());
            }
        }
    }

    pub fn select_ward(&mut self, ward: Ward) {
        self.ward = Some(ward);
    }

    /// Complete address, once all three levels are chosen
    pub fn to_shipping_address(&self, street: impl Into<String>) -> Option<ShippingAddress> {
        let (province, district, ward) = (
            self.province.as_ref()?,
            self.district.as_ref()?,
            self.ward.as_ref()?,
        );
        Some(ShippingAddress {
            province_code: province.code,
            province_name: province.name.clone(),
            district_code: district.code,
            district_name: district.name.clone(),
            ward_code: ward.code,
            ward_name: ward.name.clone(),
            street: street.into(),
        })
    }
}
