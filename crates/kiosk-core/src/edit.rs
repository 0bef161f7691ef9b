//! Sequence edits: explicit descriptions of how a source list changed.
//!
//! Edits are plain values. The observed list performs them on its source
//! vector and hands the same value to the bounded window, so the window can
//! be driven (and tested) without any event plumbing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One mutation of an ordered source sequence.
///
/// Serialized internally tagged, e.g. `{"op":"remove","index":3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SequenceEdit<T> {
    /// `value` is inserted so that it ends up at `index`.
    Insert { index: usize, value: T },
    /// The element at `from` is removed and reinserted at `to`.
    Move { from: usize, to: usize },
    /// The element at `index` is removed.
    Remove { index: usize },
    /// The element at `index` is overwritten with `value`.
    Replace { index: usize, value: T },
    /// The source was cleared or replaced wholesale.
    Reset,
}

/// Payload-free discriminant of a [`SequenceEdit`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Move,
    Remove,
    Replace,
    Reset,
}

impl<T> SequenceEdit<T> {
    pub fn kind(&self) -> EditKind {
        match self {
            SequenceEdit::Insert { .. } => EditKind::Insert,
            SequenceEdit::Move { .. } => EditKind::Move,
            SequenceEdit::Remove { .. } => EditKind::Remove,
            SequenceEdit::Replace { .. } => EditKind::Replace,
            SequenceEdit::Reset => EditKind::Reset,
        }
    }

    /// Length the source had before this edit, given its length after.
    ///
    /// `None` for [`SequenceEdit::Reset`], which says nothing about the
    /// previous contents, and for a remove reported against a length that
    /// cannot have held one more element.
    pub(crate) fn length_before(&self, len_after: usize) -> Option<usize> {
        match self {
            SequenceEdit::Insert { .. } => len_after.checked_sub(1),
            SequenceEdit::Remove { .. } => len_after.checked_add(1),
            SequenceEdit::Move { .. } | SequenceEdit::Replace { .. } => Some(len_after),
            SequenceEdit::Reset => None,
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditKind::Insert => "insert",
            EditKind::Move => "move",
            EditKind::Remove => "remove",
            EditKind::Replace => "replace",
            EditKind::Reset => "reset",
        };
        f.write_str(name)
    }
}
