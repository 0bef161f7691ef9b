//! Catalog groups and lookup.
//!
//! A [`Catalog`] is an ordered list of [`Group`]s, each owning an
//! [`ObservedList`] of items with its top-12 window. Catalogs are built
//! explicitly and passed to whoever needs them.

use crate::edit::SequenceEdit;
use crate::list::{ListError, ObservedList};
use crate::types::Item;
use crate::window::DEFAULT_WINDOW_CAPACITY;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no entry with id {0:?}")]
    NotFound(String),
    #[error("id {id:?} matches {count} entries")]
    Ambiguous { id: String, count: usize },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate group id {0:?}")]
    DuplicateGroup(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    List(#[from] ListError),
}

/// A named bucket of items.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: String,
    pub secondary_image: String,
    items: ObservedList<Item>,
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            image: String::new(),
            secondary_image: String::new(),
            items: ObservedList::with_window_capacity(DEFAULT_WINDOW_CAPACITY),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.items.items()
    }

    /// The first (up to) twelve items, in order.
    pub fn top_items(&self) -> &[Item] {
        self.items.top()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply an edit to this group's items.
    ///
    /// Inserted and replacing items are re-parented onto this group.
    pub fn apply(&mut self, edit: SequenceEdit<Item>) -> Result<(), ListError> {
        let edit = match edit {
            SequenceEdit::Insert { index, value } => SequenceEdit::Insert {
                index,
                value: self.adopt(value),
            },
            SequenceEdit::Replace { index, value } => SequenceEdit::Replace {
                index,
                value: self.adopt(value),
            },
            other => other,
        };
        self.items.apply(edit)
    }

    pub fn push(&mut self, item: Item) -> Result<(), ListError> {
        let item = self.adopt(item);
        self.items.push(item)
    }

    /// Replace every item at once; the window is rebuilt from scratch.
    pub fn reset_items(&mut self, items: Vec<Item>) {
        let items = items.into_iter().map(|item| self.adopt(item)).collect();
        self.items.reset_with(items);
    }

    fn adopt(&self, mut item: Item) -> Item {
        if item.group_id != self.id {
            item.group_id.clone_from(&self.id);
        }
        item
    }
}

/// All groups of a storefront, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: Vec<Group>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group. Group ids must be unique within a catalog.
    pub fn add_group(&mut self, group: Group) -> Result<(), CatalogError> {
        if self.groups.iter().any(|g| g.id == group.id) {
            return Err(CatalogError::DuplicateGroup(group.id));
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Result<&Group, LookupError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    pub fn group_mut(&mut self, id: &str) -> Result<&mut Group, LookupError> {
        self.groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    /// Every item in the catalog, group by group.
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.groups.iter().flat_map(|g| g.items().iter())
    }

    pub fn items_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.all_items().filter(move |item| item.id == id)
    }

    /// Look up an item by id. Only an exactly-unique match is returned;
    /// shared ids yield [`LookupError::Ambiguous`].
    pub fn item(&self, id: &str) -> Result<&Item, LookupError> {
        // Matches borrow from `self` only, not from `id`.
        let mut matches = self.all_items().filter(|item| item.id == id);
        let first = matches
            .next()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))?;
        let others = matches.count();
        if others > 0 {
            return Err(LookupError::Ambiguous {
                id: id.to_string(),
                count: others + 1,
            });
        }
        Ok(first)
    }

    /// Item ids used by more than one item, with their counts, sorted by id.
    pub fn duplicate_item_ids(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in self.all_items() {
            *counts.entry(item.id.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(id, n)| (id.to_string(), n))
            .collect()
    }

    /// Route an edit to one group's item list.
    pub fn apply(&mut self, group_id: &str, edit: SequenceEdit<Item>) -> Result<(), CatalogError> {
        let kind = edit.kind();
        let group = self.group_mut(group_id)?;
        group.apply(edit)?;
        tracing::debug!(
            group = group_id,
            %kind,
            items = group.len(),
            top = group.top_items().len(),
            "catalog edit applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item::new(id, format!("title {id}"), "NT$ 10")
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let mut fruit = Group::new("fruit", "Fruit");
        for id in ["apple", "pear", "plum", "dup"] {
            fruit.push(item(id)).unwrap();
        }
        let mut tea = Group::new("tea", "Tea");
        for id in ["oolong", "dup"] {
            tea.push(item(id)).unwrap();
        }
        catalog.add_group(fruit).unwrap();
        catalog.add_group(tea).unwrap();
        catalog
    }

    #[test]
    fn test_push_sets_back_reference() {
        let catalog = catalog();
        let oolong = catalog.item("oolong").unwrap();
        assert_eq!(oolong.group_id, "tea");
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut catalog = catalog();
        let err = catalog.add_group(Group::new("tea", "Again")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGroup(id) if id == "tea"));
        assert_eq!(catalog.groups().len(), 2);
    }

    #[test]
    fn test_item_lookup_requires_unique_id() {
        let catalog = catalog();
        assert_eq!(catalog.item("plum").unwrap().title, "title plum");
        assert_eq!(
            catalog.item("dup").unwrap_err(),
            LookupError::Ambiguous { id: "dup".into(), count: 2 }
        );
        assert_eq!(
            catalog.item("kiwi").unwrap_err(),
            LookupError::NotFound("kiwi".into())
        );
        assert_eq!(catalog.items_with_id("dup").count(), 2);
    }

    #[test]
    fn test_item_outlives_temporary_id() {
        let catalog = catalog();
        let found = {
            let id = String::from("pear");
            catalog.item(&id).unwrap()
        };
        assert_eq!(found.id, "pear");
        assert_eq!(found.group_id, "fruit");
    }

    #[test]
    fn test_group_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.group("fruit").unwrap().len(), 4);
        assert!(matches!(catalog.group("nuts"), Err(LookupError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_item_ids() {
        let catalog = catalog();
        assert_eq!(catalog.duplicate_item_ids(), vec![("dup".to_string(), 2)]);
    }

    #[test]
    fn test_apply_reparents_and_updates_window() {
        let mut catalog = catalog();
        let mut stray = item("kiwi");
        stray.group_id = "elsewhere".into();
        catalog
            .apply("tea", SequenceEdit::Insert { index: 0, value: stray })
            .unwrap();

        let tea = catalog.group("tea").unwrap();
        assert_eq!(tea.top_items()[0].id, "kiwi");
        assert_eq!(tea.top_items()[0].group_id, "tea");
    }

    #[test]
    fn test_apply_unknown_group_or_bad_index() {
        let mut catalog = catalog();
        let err = catalog
            .apply("nuts", SequenceEdit::Remove { index: 0 })
            .unwrap_err();
        assert!(matches!(err, CatalogError::Lookup(LookupError::NotFound(_))));

        let err = catalog
            .apply("tea", SequenceEdit::Remove { index: 5 })
            .unwrap_err();
        assert!(matches!(err, CatalogError::List(ListError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_window_caps_at_twelve() {
        let mut group = Group::new("big", "Big");
        for i in 0..13 {
            group.push(item(&format!("i{i}"))).unwrap();
        }
        assert_eq!(group.top_items().len(), 12);
        group.apply(SequenceEdit::Remove { index: 0 }).unwrap();
        let ids: Vec<&str> = group.top_items().iter().map(|i| i.id.as_str()).collect();
        let expected: Vec<String> = (1..13).map(|i| format!("i{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_reset_items_rebuilds_window() {
        let mut group = Group::new("g", "G");
        group.push(item("old")).unwrap();
        group.reset_items((0..20).map(|i| item(&format!("n{i}"))).collect());
        assert_eq!(group.len(), 20);
        assert_eq!(group.top_items().len(), 12);
        assert!(group.items().iter().all(|i| i.group_id == "g"));
    }
}
