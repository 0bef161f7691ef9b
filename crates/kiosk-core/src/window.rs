//! Bounded window: a capped prefix view that follows a source list.
//!
//! The window never changes on its own. Every change to the source is
//! reported as a [`SequenceEdit`] together with the source as it looks after
//! the edit, and [`BoundedWindow::apply`] brings the window back to
//! `source[..min(capacity, source.len())]`.

use crate::edit::{EditKind, SequenceEdit};
use thiserror::Error;

/// Number of leading items a group shows on its landing tile.
///
/// Twelve fills grid columns evenly whether the tile lays out 1, 2, 3, 4 or
/// 6 rows.
pub const DEFAULT_WINDOW_CAPACITY: usize = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("{kind} index {index} out of range for source of length {len}")]
    IndexOutOfRange {
        kind: EditKind,
        index: usize,
        len: usize,
    },
    #[error("window holds {actual} elements before {kind}, expected {expected}")]
    LengthMismatch {
        kind: EditKind,
        expected: usize,
        actual: usize,
    },
}

/// Derived view over the first `capacity` elements of a source sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedWindow<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Clone> BoundedWindow<T> {
    /// Empty window with [`DEFAULT_WINDOW_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_CAPACITY)
    }

    /// Empty window holding at most `capacity` elements (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Window already synchronized with `source`.
    pub fn from_source(source: &[T], capacity: usize) -> Self {
        let mut window = Self::with_capacity(capacity);
        window.reset(source);
        window
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Update the window for one edit already performed on `source`.
    ///
    /// Indices in `edit` refer to `source` as it was when the edit happened;
    /// `source` itself must be the post-edit state. An edit that cannot have
    /// produced `source` from the sequence this window mirrors is rejected
    /// and the window is left as it was.
    pub fn apply(&mut self, source: &[T], edit: &SequenceEdit<T>) -> Result<(), WindowError> {
        self.check(source, edit)?;
        let cap = self.capacity;

        match *edit {
            SequenceEdit::Insert { index, .. } => {
                if index < cap {
                    self.items.insert(index, source[index].clone());
                    self.items.truncate(cap);
                }
            }
            SequenceEdit::Move { from, to } => {
                if from < cap && to < cap {
                    let moved = self.items.remove(from);
                    self.items.insert(to, moved);
                } else if from < cap {
                    // Left the band: the element now at cap - 1 slides in.
                    self.items.remove(from);
                    self.items.push(source[cap - 1].clone());
                } else if to < cap {
                    self.items.insert(to, source[to].clone());
                    self.items.truncate(cap);
                }
            }
            SequenceEdit::Remove { index } => {
                if index < cap {
                    self.items.remove(index);
                    if source.len() >= cap {
                        self.items.push(source[cap - 1].clone());
                    }
                }
            }
            SequenceEdit::Replace { index, .. } => {
                if index < cap {
                    self.items[index] = source[index].clone();
                }
            }
            SequenceEdit::Reset => self.reset(source),
        }

        Ok(())
    }

    /// Rebuild from `source`. Same effect as applying [`SequenceEdit::Reset`].
    pub(crate) fn reset(&mut self, source: &[T]) {
        self.items.clear();
        self.items
            .extend(source.iter().take(self.capacity).cloned());
    }

    fn check(&self, source: &[T], edit: &SequenceEdit<T>) -> Result<(), WindowError> {
        let len = source.len();
        let kind = edit.kind();
        let out_of_range = |index: usize| WindowError::IndexOutOfRange { kind, index, len };

        match *edit {
            SequenceEdit::Insert { index, .. } | SequenceEdit::Replace { index, .. } => {
                if index >= len {
                    return Err(out_of_range(index));
                }
            }
            SequenceEdit::Move { from, to } => {
                if from >= len {
                    return Err(out_of_range(from));
                }
                if to >= len {
                    return Err(out_of_range(to));
                }
            }
            // The removed element is gone from `source`, so `index == len`
            // (removing the old last element) is valid.
            SequenceEdit::Remove { index } => {
                if index > len {
                    return Err(out_of_range(index));
                }
            }
            SequenceEdit::Reset => return Ok(()),
        }

        if let Some(before) = edit.length_before(len) {
            let expected = before.min(self.capacity);
            if self.items.len() != expected {
                return Err(WindowError::LengthMismatch {
                    kind,
                    expected,
                    actual: self.items.len(),
                });
            }
        }

        Ok(())
    }
}

impl<T: Clone> Default for BoundedWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a BoundedWindow<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
