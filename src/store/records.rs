use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Global display configuration, stored once under [`SETTING_KEY`](super::SETTING_KEY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub season: String,
    pub period: String,
    pub device_id: String,
}

/// Latest report from a shelf device. Each `recommends` entry is a JSON document
/// of its own and is decoded per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub unixtime: i64,
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub recommends: Vec<String>,
}

/// Catalog entry for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub name: String,
    pub price: String,
    pub location: String,
}
