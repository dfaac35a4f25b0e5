use serde::Serialize;

use crate::devices::decoder::Recommendation;
use crate::store::{Item, Setting};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub setting: Setting,
    pub image_bucket: String,
    pub annotated_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayView {
    pub recommends: Vec<Recommendation>,
    pub timestamp: String,
    #[serde(rename = "loop")]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideView {
    pub item: String,
    pub title: String,
    pub show_detail: bool,
    pub missing_items: Vec<Item>,
    pub ready_to_go: bool,
}
