use serde::{Deserialize, Serialize};

/// A single catalog entry with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog key. Not guaranteed unique across the catalog.
    pub id: String,
    pub title: String,
    /// Short secondary line; the storefront uses it for the price.
    pub subtitle: String,
    pub description: String,
    /// Product image reference (URL or asset-relative path).
    pub image: String,
    /// Second image reference; the storefront uses it for a QR code.
    pub secondary_image: String,
    #[serde(default)]
    pub content: String,
    /// Key of the owning group. Set by the group when the item is added.
    #[serde(default)]
    pub group_id: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            description: String::new(),
            image: String::new(),
            secondary_image: String::new(),
            content: String::new(),
            group_id: String::new(),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
