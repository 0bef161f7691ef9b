//! Sample catalog and catalog file loading.
//!
//! The storefront's placeholder catalog is embedded at compile time from
//! `contrib/catalog/sample.toml`. Operators can point at their own file with
//! the same layout.

use crate::catalog::{Catalog, CatalogError, Group};
use crate::types::Item;
use serde::Deserialize;
use std::path::Path;

const SAMPLE_CATALOG: &str = include_str!("../../../contrib/catalog/sample.toml");

/// Paragraph count of generated item content.
const FILLER_REPEAT: usize = 7;

/// Top-level catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    /// Placeholder text used to generate content for items that have none.
    #[serde(default)]
    pub filler: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// One `[[groups]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub secondary_image: String,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// One `[[groups.items]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub secondary_image: String,
    pub content: Option<String>,
}

/// Build the embedded sample catalog.
pub fn sample_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(SAMPLE_CATALOG)
}

/// Load a catalog from a TOML file on disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&src)?;
    tracing::info!(path = %path.display(), groups = catalog.groups().len(), "catalog loaded");
    Ok(catalog)
}

/// Parse catalog TOML and build groups in file order.
pub fn parse_catalog(src: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(src)?;
    build_catalog(file)
}

pub fn build_catalog(file: CatalogFile) -> Result<Catalog, CatalogError> {
    let generated = file.filler.as_deref().map(item_content).unwrap_or_default();
    let mut catalog = Catalog::new();

    for entry in file.groups {
        let mut group = Group::new(entry.id, entry.title);
        group.subtitle = entry.subtitle;
        group.description = entry.description;
        group.image = entry.image;
        group.secondary_image = entry.secondary_image;

        let items = entry
            .items
            .into_iter()
            .map(|e| Item {
                id: e.id,
                title: e.title,
                subtitle: e.subtitle,
                description: e.description,
                image: e.image,
                secondary_image: e.secondary_image,
                content: e.content.unwrap_or_else(|| generated.clone()),
                group_id: String::new(),
            })
            .collect();
        group.reset_items(items);

        tracing::debug!(group = %group.id, items = group.len(), "catalog group built");
        catalog.add_group(group)?;
    }

    let duplicates = catalog.duplicate_item_ids();
    if !duplicates.is_empty() {
        tracing::warn!(?duplicates, "catalog has shared item ids; lookups by these ids are ambiguous");
    }

    Ok(catalog)
}

/// "Item Content: " followed by the filler repeated as blank-line separated
/// paragraphs.
fn item_content(filler: &str) -> String {
    let mut content = format!("Item Content: {filler}");
    for _ in 1..FILLER_REPEAT {
        content.push_str("\n\n");
        content.push_str(filler);
    }
    content
}
