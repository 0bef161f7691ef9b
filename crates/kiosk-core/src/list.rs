//! Observed list: an ordered source sequence that keeps its bounded window
//! in step with every mutation.

use crate::edit::{EditKind, SequenceEdit};
use crate::window::{BoundedWindow, WindowError, DEFAULT_WINDOW_CAPACITY};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("{kind} index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        kind: EditKind,
        index: usize,
        len: usize,
    },
    /// The source changed but the window refused the edit. The list and its
    /// window no longer agree; this indicates a bug, not bad input.
    #[error("window out of sync with list: {0}")]
    Window(#[from] WindowError),
}

/// Full item sequence plus its derived top-N window.
///
/// All mutation goes through [`ObservedList::apply`]; the window has no
/// mutation path of its own.
#[derive(Debug, Clone)]
pub struct ObservedList<T> {
    items: Vec<T>,
    window: BoundedWindow<T>,
}

impl<T: Clone> ObservedList<T> {
    pub fn new() -> Self {
        Self::with_window_capacity(DEFAULT_WINDOW_CAPACITY)
    }

    pub fn with_window_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            window: BoundedWindow::with_capacity(capacity),
        }
    }

    pub fn from_vec(items: Vec<T>, capacity: usize) -> Self {
        let window = BoundedWindow::from_source(&items, capacity);
        Self { items, window }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn top(&self) -> &[T] {
        self.window.as_slice()
    }

    pub fn window(&self) -> &BoundedWindow<T> {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Perform `edit` on the list, then propagate it to the window.
    ///
    /// An edit with an invalid index is rejected before anything changes.
    pub fn apply(&mut self, edit: SequenceEdit<T>) -> Result<(), ListError> {
        let len = self.items.len();
        let kind = edit.kind();
        let out_of_range = |index: usize| ListError::IndexOutOfRange { kind, index, len };

        // Perform on the source, then describe the result to the window.
        let notice = match edit {
            SequenceEdit::Insert { index, value } => {
                if index > len {
                    return Err(out_of_range(index));
                }
                self.items.insert(index, value);
                SequenceEdit::Insert {
                    index,
                    value: self.items[index].clone(),
                }
            }
            SequenceEdit::Move { from, to } => {
                if from >= len {
                    return Err(out_of_range(from));
                }
                if to >= len {
                    return Err(out_of_range(to));
                }
                let moved = self.items.remove(from);
                self.items.insert(to, moved);
                SequenceEdit::Move { from, to }
            }
            SequenceEdit::Remove { index } => {
                if index >= len {
                    return Err(out_of_range(index));
                }
                self.items.remove(index);
                SequenceEdit::Remove { index }
            }
            SequenceEdit::Replace { index, value } => {
                if index >= len {
                    return Err(out_of_range(index));
                }
                self.items[index] = value;
                SequenceEdit::Replace {
                    index,
                    value: self.items[index].clone(),
                }
            }
            SequenceEdit::Reset => SequenceEdit::Reset,
        };

        if let Err(err) = self.window.apply(&self.items, &notice) {
            tracing::error!(%kind, error = %err, len = self.items.len(), "window rejected list edit");
            return Err(err.into());
        }

        tracing::trace!(%kind, len = self.items.len(), top = self.window.len(), "list edited");
        Ok(())
    }

    pub fn push(&mut self, value: T) -> Result<(), ListError> {
        let index = self.items.len();
        self.apply(SequenceEdit::Insert { index, value })
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ListError> {
        self.apply(SequenceEdit::Insert { index, value })
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        let removed = self
            .items
            .get(index)
            .cloned()
            .ok_or(ListError::IndexOutOfRange {
                kind: EditKind::Remove,
                index,
                len: self.items.len(),
            })?;
        self.apply(SequenceEdit::Remove { index })?;
        Ok(removed)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        self.apply(SequenceEdit::Move { from, to })
    }

    pub fn replace(&mut self, index: usize, value: T) -> Result<(), ListError> {
        self.apply(SequenceEdit::Replace { index, value })
    }

    pub fn clear(&mut self) {
        self.reset_with(Vec::new());
    }

    /// Swap in a whole new sequence and rebuild the window from it.
    pub fn reset_with(&mut self, items: Vec<T>) {
        self.items = items;
        self.window.reset(&self.items);
    }
}

impl<T: Clone> Default for ObservedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ObservedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: u32) -> ObservedList<u32> {
        let mut list = ObservedList::new();
        for i in 0..n {
            list.push(i).unwrap();
        }
        list
    }

    fn assert_synced(list: &ObservedList<u32>) {
        let n = list.len().min(DEFAULT_WINDOW_CAPACITY);
        assert_eq!(list.top(), &list.items()[..n]);
    }

    #[test]
    fn test_push_fills_window_to_cap() {
        let list = list_of(20);
        assert_eq!(list.len(), 20);
        assert_eq!(list.top().len(), 12);
        assert_synced(&list);
    }

    #[test]
    fn test_mutators_keep_window_synced() {
        let mut list = list_of(16);
        list.insert(0, 100).unwrap();
        assert_synced(&list);
        list.move_item(14, 2).unwrap();
        assert_synced(&list);
        list.move_item(1, 15).unwrap();
        assert_synced(&list);
        list.replace(3, 300).unwrap();
        assert_synced(&list);

        let expected = list.items()[11];
        assert_eq!(list.remove(11).unwrap(), expected);
        assert_synced(&list);
        assert_eq!(list.top().len(), 12);
    }

    #[test]
    fn test_remove_front_refills_from_tail() {
        let mut list = list_of(13);
        list.remove(0).unwrap();
        assert_eq!(list.top(), &(1..13).collect::<Vec<u32>>()[..]);
    }

    #[test]
    fn test_out_of_range_leaves_list_untouched() {
        let mut list = list_of(4);
        let err = list.insert(9, 1).unwrap_err();
        assert_eq!(
            err,
            ListError::IndexOutOfRange { kind: EditKind::Insert, index: 9, len: 4 }
        );
        assert!(list.remove(4).is_err());
        assert!(list.move_item(0, 4).is_err());
        assert!(list.replace(7, 0).is_err());
        assert_eq!(list.items(), &[0, 1, 2, 3]);
        assert_synced(&list);
    }

    #[test]
    fn test_insert_at_end_is_valid() {
        let mut list = list_of(2);
        list.insert(2, 9).unwrap();
        assert_eq!(list.items(), &[0, 1, 9]);
        assert_eq!(list.top(), &[0, 1, 9]);
    }

    #[test]
    fn test_reset_with_and_clear() {
        let mut list = list_of(5);
        list.reset_with((50..70).collect());
        assert_eq!(list.top().first(), Some(&50));
        assert_synced(&list);
        list.clear();
        assert!(list.is_empty());
        assert!(list.top().is_empty());
    }

    #[test]
    fn test_small_window_capacity() {
        let mut list = ObservedList::with_window_capacity(3);
        for i in 0..6u32 {
            list.push(i).unwrap();
        }
        list.remove(1).unwrap();
        assert_eq!(list.top(), &[0, 2, 3]);
        list.move_item(4, 0).unwrap();
        assert_eq!(list.top(), &[5, 0, 2]);
    }
}
