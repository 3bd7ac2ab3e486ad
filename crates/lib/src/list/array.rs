//! Array-backed keyed list with no ordering or uniqueness constraints.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Bound, Deref, Range, RangeBounds};

use tracing::trace;

use super::{KeyedList, ObservableKeyedList};
use crate::Result;
use crate::errors::KeyedListError;
use crate::keyed::Keyed;
use crate::observer::{ListChange, ObserverRegistry};

/// A `Vec`-backed list that can also look elements up by key.
///
/// The list places no restrictions on the order or duplication of keys, so
/// key lookups scan linearly: [`index_of_key`](KeyedList::index_of_key) from
/// the front, [`last_index_of_key`](KeyedList::last_index_of_key) from the back.
///
/// Every mutation reports what it changed to the registered observers.
///
/// # Examples
///
/// ```
/// use keyed_list::{Keyed, KeyedList, ObservableKeyedArrayList};
///
/// #[derive(Debug, PartialEq)]
/// struct Peer {
///     endpoint: &'static str,
///     handshakes: u32,
/// }
///
/// impl Keyed<&'static str> for Peer {
///     fn key(&self) -> &&'static str {
///         &self.endpoint
///     }
/// }
///
/// let mut peers: ObservableKeyedArrayList<&'static str, Peer> = ObservableKeyedArrayList::new();
/// peers.push(Peer { endpoint: "10.0.0.1", handshakes: 1 });
/// peers.push(Peer { endpoint: "10.0.0.2", handshakes: 3 });
/// peers.push(Peer { endpoint: "10.0.0.1", handshakes: 7 });
///
/// assert_eq!(peers.index_of_key(&"10.0.0.1"), Some(0));
/// assert_eq!(peers.last_index_of_key(&"10.0.0.1"), Some(2));
/// assert_eq!(peers.get_last_by_key(&"10.0.0.1").map(|p| p.handshakes), Some(7));
/// ```
pub struct ObservableKeyedArrayList<K, E> {
    items: Vec<E>,
    observers: ObserverRegistry<E>,
    _key: PhantomData<fn() -> K>,
}

impl<K, E> ObservableKeyedArrayList<K, E> {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates a new empty list with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    fn from_vec(items: Vec<E>) -> Self {
        Self {
            items,
            observers: ObserverRegistry::new(),
            _key: PhantomData,
        }
    }

    /// The elements as a slice
    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    /// Number of elements the list can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Consumes the list, returning its elements
    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    pub(crate) fn registry(&self) -> &ObserverRegistry<E> {
        &self.observers
    }

    fn emit(&self, change: ListChange) {
        trace!(?change, len = self.items.len(), "List changed");
        self.observers.notify(&self.items, change);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(KeyedListError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index <= self.items.len() {
            Ok(())
        } else {
            Err(KeyedListError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    fn resolve_range(&self, range: impl RangeBounds<usize>) -> Result<Range<usize>> {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        if end > len {
            return Err(KeyedListError::IndexOutOfBounds { index: end, len });
        }
        if start > end {
            return Err(KeyedListError::IndexOutOfBounds { index: start, len });
        }
        Ok(start..end)
    }

    /// Appends an element to the end of the list
    pub fn push(&mut self, element: E) {
        let start = self.items.len();
        self.items.push(element);
        self.emit(ListChange::Inserted { start, count: 1 });
    }

    /// Inserts an element at `index`, shifting later elements back
    pub fn insert(&mut self, index: usize, element: E) -> Result<()> {
        self.check_insert_index(index)?;
        self.items.insert(index, element);
        self.emit(ListChange::Inserted {
            start: index,
            count: 1,
        });
        Ok(())
    }

    /// Appends every element of `elements`.
    ///
    /// Emits a single insertion covering all appended elements. Returns true
    /// if anything was appended.
    pub fn add_all(&mut self, elements: impl IntoIterator<Item = E>) -> bool {
        let start = self.items.len();
        self.items.extend(elements);
        let count = self.items.len() - start;
        if count == 0 {
            return false;
        }
        self.emit(ListChange::Inserted { start, count });
        true
    }

    /// Inserts every element of `elements` starting at `index`, keeping their order.
    ///
    /// Emits a single insertion covering all inserted elements. Returns true
    /// if anything was inserted.
    pub fn insert_all(
        &mut self,
        index: usize,
        elements: impl IntoIterator<Item = E>,
    ) -> Result<bool> {
        self.check_insert_index(index)?;
        let tail = self.items.split_off(index);
        self.items.extend(elements);
        let count = self.items.len() - index;
        self.items.extend(tail);
        if count == 0 {
            return Ok(false);
        }
        self.emit(ListChange::Inserted {
            start: index,
            count,
        });
        Ok(true)
    }

    /// Replaces the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, element: E) -> Result<E> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.items[index], element);
        self.emit(ListChange::Updated {
            start: index,
            count: 1,
        });
        Ok(previous)
    }

    /// Removes and returns the element at `index`
    pub fn remove(&mut self, index: usize) -> Result<E> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.emit(ListChange::Removed {
            start: index,
            count: 1,
        });
        Ok(removed)
    }

    /// Removes the elements in `range`, returning them in order
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Result<Vec<E>> {
        let range = self.resolve_range(range)?;
        let start = range.start;
        let removed: Vec<E> = self.items.drain(range).collect();
        if !removed.is_empty() {
            self.emit(ListChange::Removed {
                start,
                count: removed.len(),
            });
        }
        Ok(removed)
    }

    /// Keeps only the elements for which `keep` returns true.
    ///
    /// Emits one removal per contiguous run of dropped elements, front to
    /// back. Returns the number of elements removed. If `keep` panics, the
    /// list is left unchanged.
    pub fn retain(&mut self, mut keep: impl FnMut(&E) -> bool) -> usize {
        // Every verdict is taken before anything moves.
        let verdicts: Vec<bool> = self.items.iter().map(|element| keep(element)).collect();

        let mut runs: Vec<ListChange> = Vec::new();
        let mut kept = 0;
        let mut run_len = 0;
        for &keep_element in &verdicts {
            if keep_element {
                if run_len > 0 {
                    runs.push(ListChange::Removed {
                        start: kept,
                        count: run_len,
                    });
                    run_len = 0;
                }
                kept += 1;
            } else {
                run_len += 1;
            }
        }
        if run_len > 0 {
            runs.push(ListChange::Removed {
                start: kept,
                count: run_len,
            });
        }
        if runs.is_empty() {
            return 0;
        }

        let mut verdict = verdicts.into_iter();
        self.items.retain(|_| verdict.next().unwrap_or(true));

        let removed = runs.iter().map(ListChange::count).sum();
        for change in runs {
            self.emit(change);
        }
        removed
    }

    /// Removes every element
    pub fn clear(&mut self) {
        let count = self.items.len();
        self.items.clear();
        if count > 0 {
            self.emit(ListChange::Removed { start: 0, count });
        }
    }

    /// Moves the element at `from` so that it ends up at index `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let element = self.items.remove(from);
        self.items.insert(to, element);
        self.emit(ListChange::Moved { from, to, count: 1 });
        Ok(())
    }
}

impl<K, E: Keyed<K>> ObservableKeyedArrayList<K, E> {
    /// Removes and returns the first element with `key`
    pub fn remove_key(&mut self, key: &K) -> Option<E>
    where
        K: PartialEq,
    {
        let index = self.index_of_key(key)?;
        self.remove(index).ok()
    }
}

impl<K: PartialEq, E: Keyed<K>> KeyedList<K, E> for ObservableKeyedArrayList<K, E> {
    fn elements(&self) -> &[E] {
        &self.items
    }

    fn index_of_key(&self, key: &K) -> Option<usize> {
        self.items.iter().position(|element| element.key() == key)
    }

    fn last_index_of_key(&self, key: &K) -> Option<usize> {
        self.items.iter().rposition(|element| element.key() == key)
    }
}

impl<K: PartialEq, E: Keyed<K>> ObservableKeyedList<K, E> for ObservableKeyedArrayList<K, E> {
    fn observers(&self) -> &ObserverRegistry<E> {
        &self.observers
    }
}

impl<K, E> Deref for ObservableKeyedArrayList<K, E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.items
    }
}

impl<K, E> Default for ObservableKeyedArrayList<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the elements. Observers stay with the original list.
impl<K, E: Clone> Clone for ObservableKeyedArrayList<K, E> {
    fn clone(&self) -> Self {
        Self::from_vec(self.items.clone())
    }
}

impl<K, E: fmt::Debug> fmt::Debug for ObservableKeyedArrayList<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableKeyedArrayList")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<K, E: PartialEq> PartialEq for ObservableKeyedArrayList<K, E> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K, E: Eq> Eq for ObservableKeyedArrayList<K, E> {}

impl<K, E> From<Vec<E>> for ObservableKeyedArrayList<K, E> {
    fn from(items: Vec<E>) -> Self {
        Self::from_vec(items)
    }
}

impl<K, E> FromIterator<E> for ObservableKeyedArrayList<K, E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<K, E> Extend<E> for ObservableKeyedArrayList<K, E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}

impl<'a, K, E> IntoIterator for &'a ObservableKeyedArrayList<K, E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
