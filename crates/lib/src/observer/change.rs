//! Structural change events emitted by observable lists.

/// The kind of a [`ListChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeKind {
    Insert,
    Remove,
    Update,
    Move,
}

/// A contiguous structural change to a list.
///
/// Indices refer to the list as it stood when this particular change was
/// applied. When one mutation produces several changes, applying them in
/// delivery order to a mirror of the previous contents reproduces the new
/// contents.
///
/// # Examples
///
/// ```
/// use keyed_list::{ChangeKind, ListChange};
///
/// let change = ListChange::Inserted { start: 2, count: 3 };
/// assert_eq!(change.kind(), ChangeKind::Insert);
/// assert_eq!(change.start(), 2);
/// assert_eq!(change.count(), 3);
/// assert_eq!(change.range(), 2..5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListChange {
    /// `count` elements were inserted starting at `start`.
    Inserted { start: usize, count: usize },
    /// `count` elements were removed starting at `start`.
    Removed { start: usize, count: usize },
    /// `count` elements starting at `start` were replaced in place.
    Updated { start: usize, count: usize },
    /// `count` elements moved from `from` to `to`.
    Moved { from: usize, to: usize, count: usize },
}

impl ListChange {
    /// The kind of change.
    pub fn kind(&self) -> ChangeKind {
        match self {
            ListChange::Inserted { .. } => ChangeKind::Insert,
            ListChange::Removed { .. } => ChangeKind::Remove,
            ListChange::Updated { .. } => ChangeKind::Update,
            ListChange::Moved { .. } => ChangeKind::Move,
        }
    }

    /// First affected index. For moves this is the source index.
    pub fn start(&self) -> usize {
        match *self {
            ListChange::Inserted { start, .. }
            | ListChange::Removed { start, .. }
            | ListChange::Updated { start, .. } => start,
            ListChange::Moved { from, .. } => from,
        }
    }

    /// Number of affected elements.
    pub fn count(&self) -> usize {
        match *self {
            ListChange::Inserted { count, .. }
            | ListChange::Removed { count, .. }
            | ListChange::Updated { count, .. }
            | ListChange::Moved { count, .. } => count,
        }
    }

    /// Affected index range, `start()..start() + count()`.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start()..self.start() + self.count()
    }

    /// Destination index of a move.
    pub fn move_target(&self) -> Option<usize> {
        match *self {
            ListChange::Moved { to, .. } => Some(to),
            _ => None,
        }
    }
}
