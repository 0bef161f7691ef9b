//! Catalog store thread.
//!
//! The catalog has exactly one owner: a dedicated OS thread that applies
//! every edit and answers every read in arrival order. Handlers talk to it
//! through a cloneable [`StoreHandle`], so list mutations and window updates
//! are serialized no matter how many bus calls are in flight.

use kiosk_core::{
    Catalog, CatalogError, GroupSummary, Item, LookupError, SelectionSummary, SequenceEdit,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to spawn store thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("store thread exited")]
    ChannelClosed,
}

/// Snapshot of store counters.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub groups: usize,
    pub items: usize,
    pub edits_applied: u64,
    pub edits_rejected: u64,
}

/// Which slice of a group's items to return.
#[derive(Debug, Clone, Copy)]
pub enum ItemView {
    All,
    Top,
}

/// Messages sent from bus handlers to the store thread.
enum StoreRequest {
    ListGroups {
        reply: oneshot::Sender<Vec<GroupSummary>>,
    },
    Items {
        group: String,
        view: ItemView,
        reply: oneshot::Sender<Result<Vec<Item>, StoreError>>,
    },
    Item {
        id: String,
        reply: oneshot::Sender<Result<Item, StoreError>>,
    },
    Apply {
        group: String,
        edit: SequenceEdit<Item>,
        reply: oneshot::Sender<Result<Vec<Item>, StoreError>>,
    },
    Status {
        reply: oneshot::Sender<StoreStatus>,
    },
}

/// Clone-safe handle to the store thread.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreRequest>,
}

impl StoreHandle {
    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> StoreRequest,
    ) -> Result<R, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        reply_rx.await.map_err(|_| StoreError::ChannelClosed)
    }

    pub async fn list_groups(&self) -> Result<Vec<GroupSummary>, StoreError> {
        self.request(|reply| StoreRequest::ListGroups { reply }).await
    }

    pub async fn items(&self, group: &str, view: ItemView) -> Result<Vec<Item>, StoreError> {
        let group = group.to_string();
        self.request(|reply| StoreRequest::Items { group, view, reply })
            .await?
    }

    pub async fn item(&self, id: &str) -> Result<Item, StoreError> {
        let id = id.to_string();
        self.request(|reply| StoreRequest::Item { id, reply }).await?
    }

    pub async fn select(&self, id: &str) -> Result<SelectionSummary, StoreError> {
        let item = self.item(id).await?;
        tracing::info!(id, title = %item.title, "item selected");
        Ok(SelectionSummary::from_item(&item))
    }

    /// Apply one edit to a group and return its window afterwards.
    pub async fn apply(
        &self,
        group: &str,
        edit: SequenceEdit<Item>,
    ) -> Result<Vec<Item>, StoreError> {
        let group = group.to_string();
        self.request(|reply| StoreRequest::Apply { group, edit, reply })
            .await?
    }

    pub async fn status(&self) -> Result<StoreStatus, StoreError> {
        self.request(|reply| StoreRequest::Status { reply }).await
    }
}

struct Store {
    catalog: Catalog,
    edits_applied: u64,
    edits_rejected: u64,
}

impl Store {
    fn handle(&mut self, req: StoreRequest) {
        match req {
            StoreRequest::ListGroups { reply } => {
                let groups = self
                    .catalog
                    .groups()
                    .iter()
                    .map(GroupSummary::from_group)
                    .collect();
                let _ = reply.send(groups);
            }
            StoreRequest::Items { group, view, reply } => {
                let result = self
                    .catalog
                    .group(&group)
                    .map(|g| match view {
                        ItemView::All => g.items().to_vec(),
                        ItemView::Top => g.top_items().to_vec(),
                    })
                    .map_err(StoreError::from);
                let _ = reply.send(result);
            }
            StoreRequest::Item { id, reply } => {
                let result = self.catalog.item(&id).cloned().map_err(StoreError::from);
                let _ = reply.send(result);
            }
            StoreRequest::Apply { group, edit, reply } => {
                let _ = reply.send(self.apply(&group, edit));
            }
            StoreRequest::Status { reply } => {
                let _ = reply.send(StoreStatus {
                    groups: self.catalog.groups().len(),
                    items: self.catalog.all_items().count(),
                    edits_applied: self.edits_applied,
                    edits_rejected: self.edits_rejected,
                });
            }
        }
    }

    fn apply(&mut self, group: &str, edit: SequenceEdit<Item>) -> Result<Vec<Item>, StoreError> {
        let kind = edit.kind();
        match self.catalog.apply(group, edit) {
            Ok(()) => {
                self.edits_applied += 1;
                Ok(self.catalog.group(group)?.top_items().to_vec())
            }
            Err(err) => {
                self.edits_rejected += 1;
                tracing::warn!(group, %kind, error = %err, "edit rejected");
                Err(err.into())
            }
        }
    }
}

/// Spawn the store on a dedicated OS thread, taking ownership of `catalog`.
pub fn spawn_store(catalog: Catalog, queue: usize) -> Result<StoreHandle, StoreError> {
    let (tx, mut rx) = mpsc::channel::<StoreRequest>(queue.max(1));
    let mut store = Store {
        catalog,
        edits_applied: 0,
        edits_rejected: 0,
    };

    std::thread::Builder::new()
        .name("kiosk-store".into())
        .spawn(move || {
            tracing::info!(groups = store.catalog.groups().len(), "store thread started");
            while let Some(req) = rx.blocking_recv() {
                store.handle(req);
            }
            tracing::info!("store thread exiting");
        })?;

    Ok(StoreHandle { tx })
}
