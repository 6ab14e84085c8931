//! Administrative divisions from the public province/district/ward dataset

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub code: u32,
    pub name: String,
    /// Present only when requested with `depth=2`
    #[serde(default)]
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub wards: Vec<Ward>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ward {
    pub code: u32,
    pub name: String,
}
