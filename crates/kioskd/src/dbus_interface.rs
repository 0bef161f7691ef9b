use crate::store::{ItemView, StoreError, StoreHandle};
use kiosk_core::{CatalogError, Item, SequenceEdit};
use serde::Serialize;
use zbus::interface;

pub const BUS_NAME: &str = "org.kiosk.Catalog1";
pub const OBJECT_PATH: &str = "/org/kiosk/Catalog1";

/// D-Bus interface for the kiosk catalog daemon.
///
/// Bus name: org.kiosk.Catalog1
/// Object path: /org/kiosk/Catalog1
///
/// Payloads are JSON strings.
pub struct CatalogService {
    store: StoreHandle,
}

impl CatalogService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

#[interface(name = "org.kiosk.Catalog1")]
impl CatalogService {
    /// Summaries of every group, in display order.
    async fn list_groups(&self) -> zbus::fdo::Result<String> {
        let groups = self.store.list_groups().await.map_err(to_fdo)?;
        to_json(&groups)
    }

    /// All items of a group.
    async fn items(&self, group: &str) -> zbus::fdo::Result<String> {
        let items = self.store.items(group, ItemView::All).await.map_err(to_fdo)?;
        to_json(&items)
    }

    /// The group's top-item window.
    async fn top_items(&self, group: &str) -> zbus::fdo::Result<String> {
        let items = self.store.items(group, ItemView::Top).await.map_err(to_fdo)?;
        to_json(&items)
    }

    /// A single item; fails if the id is unknown or shared.
    async fn item(&self, id: &str) -> zbus::fdo::Result<String> {
        let item = self.store.item(id).await.map_err(to_fdo)?;
        to_json(&item)
    }

    /// Selection card contents for an item.
    async fn select(&self, id: &str) -> zbus::fdo::Result<String> {
        let summary = self.store.select(id).await.map_err(to_fdo)?;
        to_json(&summary)
    }

    /// Apply a JSON sequence edit to a group; returns the new window.
    async fn apply_edit(&self, group: &str, edit: &str) -> zbus::fdo::Result<String> {
        let edit: SequenceEdit<Item> = serde_json::from_str(edit)
            .map_err(|e| zbus::fdo::Error::InvalidArgs(format!("bad edit: {e}")))?;
        tracing::info!(group, kind = %edit.kind(), "apply_edit requested");
        let top = self.store.apply(group, edit).await.map_err(to_fdo)?;
        to_json(&top)
    }

    /// Return daemon status information.
    async fn status(&self) -> zbus::fdo::Result<String> {
        let status = self.store.status().await.map_err(to_fdo)?;
        Ok(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "groups": status.groups,
            "items": status.items,
            "edits_applied": status.edits_applied,
            "edits_rejected": status.edits_rejected,
        })
        .to_string())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> zbus::fdo::Result<String> {
    serde_json::to_string(value).map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
}

/// Bad caller input maps to `InvalidArgs`; anything else is `Failed`.
fn to_fdo(err: StoreError) -> zbus::fdo::Error {
    match err {
        StoreError::Lookup(e) | StoreError::Catalog(CatalogError::Lookup(e)) => {
            zbus::fdo::Error::InvalidArgs(e.to_string())
        }
        StoreError::Catalog(e @ CatalogError::List(kiosk_core::ListError::IndexOutOfRange { .. })) => {
            zbus::fdo::Error::InvalidArgs(e.to_string())
        }
        other => {
            tracing::error!(error = %other, "catalog request failed");
            zbus::fdo::Error::Failed(other.to_string())
        }
    }
}
