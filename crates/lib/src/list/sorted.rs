//! Array-backed keyed list held in key order with unique keys.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, RangeBounds};

use tracing::debug;

use super::array::ObservableKeyedArrayList;
use super::{KeyedList, ObservableKeyedList, SortedKeyedList};
use crate::Result;
use crate::errors::KeyedListError;
use crate::keyed::{Keyed, SameElement};
use crate::observer::ObserverRegistry;
use crate::order::KeyOrder;

/// A keyed list that keeps its elements sorted by key and rejects duplicate keys.
///
/// Lookup and replacement use binary search, O(log n). Insertion and removal
/// anywhere but at the end still shift the backing array, O(n).
///
/// Positional insertion ([`insert`](Self::insert)) and replacement
/// ([`set`](Self::set)) are accepted only when the caller's index agrees
/// with the sorted order.
///
/// # Examples
///
/// ```
/// use keyed_list::{Keyed, KeyedList, ObservableSortedKeyedArrayList, SortedKeyedList};
/// use std::rc::Rc;
///
/// struct Tunnel {
///     name: String,
/// }
///
/// impl Keyed<String> for Tunnel {
///     fn key(&self) -> &String {
///         &self.name
///     }
/// }
///
/// let tunnel = |name: &str| Rc::new(Tunnel { name: name.to_string() });
///
/// let mut tunnels: ObservableSortedKeyedArrayList<String, Rc<Tunnel>> =
///     ObservableSortedKeyedArrayList::new();
/// let office = tunnel("office");
/// tunnels.add(tunnel("home")).unwrap();
/// tunnels.add(Rc::clone(&office)).unwrap();
/// tunnels.add(tunnel("cloud")).unwrap();
///
/// assert_eq!(tunnels.first_key().unwrap(), "cloud");
/// assert_eq!(tunnels.last_key().unwrap(), "office");
///
/// // Re-adding the same tunnel is a no-op, a different one with the same name is rejected.
/// assert_eq!(tunnels.add(office), Ok(false));
/// assert!(tunnels.add(tunnel("home")).unwrap_err().is_duplicate_key());
/// assert_eq!(tunnels.index_of_key(&"home".to_string()), Some(1));
/// ```
pub struct ObservableSortedKeyedArrayList<K, E> {
    list: ObservableKeyedArrayList<K, E>,
    order: KeyOrder<K>,
}

impl<K: Ord, E> ObservableSortedKeyedArrayList<K, E> {
    /// Creates an empty list ordered by the keys' natural order
    pub fn new() -> Self {
        Self::with_order(KeyOrder::natural())
    }

    /// Creates an empty natural-order list with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_order_and_capacity(KeyOrder::natural(), capacity)
    }
}

impl<K, E> ObservableSortedKeyedArrayList<K, E> {
    /// Creates an empty list ordered by `order`
    pub fn with_order(order: KeyOrder<K>) -> Self {
        Self {
            list: ObservableKeyedArrayList::new(),
            order,
        }
    }

    /// Creates an empty list ordered by `order` with room for `capacity` elements
    pub fn with_order_and_capacity(order: KeyOrder<K>, capacity: usize) -> Self {
        Self {
            list: ObservableKeyedArrayList::with_capacity(capacity),
            order,
        }
    }

    /// Creates an empty list ordered by `compare`
    pub fn with_comparator(compare: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        Self::with_order(KeyOrder::by(compare))
    }

    /// The elements as a slice
    pub fn as_slice(&self) -> &[E] {
        self.list.as_slice()
    }

    /// Consumes the list, returning its elements in key order
    pub fn into_vec(self) -> Vec<E> {
        self.list.into_vec()
    }
}

impl<K, E: Keyed<K>> ObservableSortedKeyedArrayList<K, E> {
    /// Builds a natural-order list from `elements`.
    ///
    /// Fails like [`add_all`](Self::add_all) if two distinct elements share a key.
    pub fn from_elements(elements: impl IntoIterator<Item = E>) -> Result<Self>
    where
        K: Ord,
        E: SameElement,
    {
        let mut list = Self::new();
        list.add_all(elements)?;
        Ok(list)
    }

    /// Copies another sorted list, including its ordering.
    pub fn from_sorted<L>(other: &L) -> Self
    where
        L: SortedKeyedList<K, E>,
        E: Clone,
    {
        Self {
            list: other.elements().iter().cloned().collect(),
            order: other.key_order().clone(),
        }
    }

    /// Binary search for `key`: `Ok(index)` if present, otherwise
    /// `Err(insertion_point)`.
    pub fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.list
            .binary_search_by(|probe| self.order.compare(probe.key(), key))
    }

    /// Inserts `element` at its sorted position.
    ///
    /// Returns `Ok(false)` without changing the list if this very element is
    /// already present. A different element with the same key is rejected
    /// with [`KeyedListError::DuplicateKey`].
    pub fn add(&mut self, element: E) -> Result<bool>
    where
        E: SameElement,
    {
        match self.search(element.key()) {
            Ok(index) => {
                if self.list[index].same_element(&element) {
                    return Ok(false);
                }
                debug!(index, "Rejected element with duplicate key");
                Err(KeyedListError::DuplicateKey { index })
            }
            Err(insertion_point) => {
                self.list.insert(insertion_point, element)?;
                Ok(true)
            }
        }
    }

    /// Inserts `element` at `index`, which must be its sorted position.
    pub fn insert(&mut self, index: usize, element: E) -> Result<()> {
        match self.search(element.key()) {
            Ok(existing) => {
                debug!(index = existing, "Rejected element with duplicate key");
                Err(KeyedListError::DuplicateKey { index: existing })
            }
            Err(expected) if expected != index => {
                debug!(index, expected, "Rejected insertion at wrong index");
                Err(KeyedListError::IndexMismatch { index, expected })
            }
            Err(_) => self.list.insert(index, element),
        }
    }

    /// Adds every element of `elements` with [`add`](Self::add).
    ///
    /// Returns true if at least one element was inserted. Stops at the first
    /// failure; elements added before it stay in the list and the failure is
    /// returned as [`KeyedListError::BulkAddInterrupted`].
    pub fn add_all(&mut self, elements: impl IntoIterator<Item = E>) -> Result<bool>
    where
        E: SameElement,
    {
        let mut applied = 0;
        for element in elements {
            match self.add(element) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(source) => return Err(Self::interrupted(applied, source)),
            }
        }
        Ok(applied > 0)
    }

    /// Inserts every element of `elements` with [`insert`](Self::insert),
    /// starting at `index` and advancing one slot per insertion.
    ///
    /// Returns true if at least one element was inserted. Failure handling
    /// matches [`add_all`](Self::add_all).
    pub fn insert_all(
        &mut self,
        index: usize,
        elements: impl IntoIterator<Item = E>,
    ) -> Result<bool> {
        let mut cursor = index;
        for element in elements {
            if let Err(source) = self.insert(cursor, element) {
                return Err(Self::interrupted(cursor - index, source));
            }
            cursor += 1;
        }
        Ok(cursor > index)
    }

    fn interrupted(applied: usize, source: KeyedListError) -> KeyedListError {
        debug!(applied, error = %source, "Bulk insertion interrupted");
        KeyedListError::BulkAddInterrupted {
            applied,
            source: Box::new(source),
        }
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// An element with an equal key always fits. A different key is accepted
    /// only if it sorts between the neighbours of `index`, so that no other
    /// element has to move.
    pub fn set(&mut self, index: usize, element: E) -> Result<E> {
        let current = self
            .list
            .get(index)
            .ok_or(KeyedListError::IndexOutOfBounds {
                index,
                len: self.list.len(),
            })?;
        if self.order.compare(element.key(), current.key()) != Ordering::Equal {
            match self.search(element.key()) {
                Ok(existing) => {
                    debug!(index = existing, "Rejected replacement with duplicate key");
                    return Err(KeyedListError::DuplicateKey { index: existing });
                }
                Err(expected) if expected != index && expected != index + 1 => {
                    debug!(index, expected, "Rejected replacement at wrong index");
                    return Err(KeyedListError::IndexMismatch { index, expected });
                }
                Err(_) => {}
            }
        }
        self.list.set(index, element)
    }

    /// Removes and returns the element at `index`
    pub fn remove(&mut self, index: usize) -> Result<E> {
        self.list.remove(index)
    }

    /// Removes the elements in `range`, returning them in key order
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Result<Vec<E>> {
        self.list.remove_range(range)
    }

    /// Removes and returns the element with `key`
    pub fn remove_key(&mut self, key: &K) -> Option<E> {
        let index = self.search(key).ok()?;
        self.list.remove(index).ok()
    }

    /// Keeps only the elements for which `keep` returns true.
    ///
    /// Returns the number of elements removed.
    pub fn retain(&mut self, keep: impl FnMut(&E) -> bool) -> usize {
        self.list.retain(keep)
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

impl<K, E: Keyed<K>> KeyedList<K, E> for ObservableSortedKeyedArrayList<K, E> {
    fn elements(&self) -> &[E] {
        self.list.as_slice()
    }

    fn index_of_key(&self, key: &K) -> Option<usize> {
        self.search(key).ok()
    }

    /// Keys are unique, so this is [`index_of_key`](KeyedList::index_of_key).
    fn last_index_of_key(&self, key: &K) -> Option<usize> {
        self.index_of_key(key)
    }
}

impl<K, E: Keyed<K>> ObservableKeyedList<K, E> for ObservableSortedKeyedArrayList<K, E> {
    fn observers(&self) -> &ObserverRegistry<E> {
        self.list.registry()
    }
}

impl<K, E: Keyed<K>> SortedKeyedList<K, E> for ObservableSortedKeyedArrayList<K, E> {
    fn key_order(&self) -> &KeyOrder<K> {
        &self.order
    }
}

impl<K, E> Deref for ObservableSortedKeyedArrayList<K, E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        self.list.as_slice()
    }
}

impl<K: Ord, E> Default for ObservableSortedKeyedArrayList<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the elements and the ordering. Observers stay with the original list.
impl<K, E: Clone> Clone for ObservableSortedKeyedArrayList<K, E> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            order: self.order.clone(),
        }
    }
}

impl<K, E: fmt::Debug> fmt::Debug for ObservableSortedKeyedArrayList<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSortedKeyedArrayList")
            .field("items", &self.list.as_slice())
            .field("order", &self.order)
            .field("observers", &self.list.registry().len())
            .finish()
    }
}

/// Compares elements only. Lists with the same elements under different
/// orderings compare equal.
impl<K, E: PartialEq> PartialEq for ObservableSortedKeyedArrayList<K, E> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<'a, K, E> IntoIterator for &'a ObservableSortedKeyedArrayList<K, E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.as_slice().iter()
    }
}
