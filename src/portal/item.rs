//! Content items as returned by `content/items/{id}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub owner: String,
    #[serde(default)]
    pub owner_folder: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    /// File name for file-backed items such as the source CSV.
    #[serde(default)]
    pub name: Option<String>,
    /// Service URL for hosted layers.
    #[serde(default)]
    pub url: Option<String>,
}

impl Item {
    /// Path of the owner's content folder holding this item.
    pub fn user_content_path(&self) -> String {
        match self.owner_folder.as_deref().filter(|f| !f.is_empty()) {
            Some(folder) => format!("content/users/{}/{}", self.owner, folder),
            None => format!("content/users/{}", self.owner),
        }
    }

    /// Hosted service name, taken from `.../services/<name>/FeatureServer`.
    pub fn service_name(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        let segments: Vec<&str> = url.trim_end_matches('/').split('/').collect();
        let server = segments
            .iter()
            .rposition(|s| s.eq_ignore_ascii_case("FeatureServer"))?;

        server.checked_sub(1).map(|i| segments[i].to_string())
    }
}

/// Properties pushed by `content/users/{owner}/items/{id}/update`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ItemProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelatedItems {
    #[serde(default)]
    pub related_items: Vec<Item>,
}
