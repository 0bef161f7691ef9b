//! kiosk-core: storefront catalog model.
//!
//! Groups of items with a derived top-12 window per group, driven by
//! explicit sequence edits, plus the embedded sample catalog and the
//! helpers the selection card uses.

pub mod catalog;
pub mod display;
pub mod edit;
pub mod list;
pub mod sample;
pub mod types;
pub mod window;

pub use catalog::{Catalog, CatalogError, Group, LookupError};
pub use display::{GroupSummary, SelectionSummary};
pub use edit::{EditKind, SequenceEdit};
pub use list::{ListError, ObservedList};
pub use sample::{load_catalog, parse_catalog, sample_catalog};
pub use types::Item;
pub use window::{BoundedWindow, WindowError, DEFAULT_WINDOW_CAPACITY};
