//! Borrowed views over a sorted list's keys.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;

use crate::keyed::Keyed;
use crate::order::KeyOrder;

/// The keys of a sorted list, in list order.
///
/// The view borrows the list, so it always reflects the list's current
/// contents and the list cannot be mutated while the view is alive. Key
/// membership uses the list's ordering, in O(log n).
pub struct KeySet<'a, K, E> {
    elements: &'a [E],
    order: &'a KeyOrder<K>,
}

impl<'a, K, E: Keyed<K>> KeySet<'a, K, E> {
    pub(crate) fn new(elements: &'a [E], order: &'a KeyOrder<K>) -> Self {
        Self { elements, order }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if `key` is in the set.
    pub fn contains(&self, key: &K) -> bool {
        self.elements
            .binary_search_by(|probe| self.order.compare(probe.key(), key))
            .is_ok()
    }

    /// Key at `index`.
    pub fn get(&self, index: usize) -> Option<&'a K> {
        self.elements.get(index).map(|element| element.key())
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&'a K> {
        self.elements.first().map(|element| element.key())
    }

    /// Largest key.
    pub fn last(&self) -> Option<&'a K> {
        self.elements.last().map(|element| element.key())
    }

    /// Iterate over the keys in order.
    pub fn iter(&self) -> Keys<'a, K, E> {
        Keys {
            inner: self.elements.iter(),
            _key: PhantomData,
        }
    }

    /// Copy the keys out of the list.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<K, E> Clone for KeySet<'_, K, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, E> Copy for KeySet<'_, K, E> {}

impl<'a, K, E: Keyed<K>> IntoIterator for KeySet<'a, K, E> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, E: Keyed<K>> IntoIterator for &KeySet<'a, K, E> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, E: Keyed<K>> fmt::Debug for KeySet<'_, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the keys of a list.
pub struct Keys<'a, K, E> {
    inner: slice::Iter<'a, E>,
    _key: PhantomData<fn() -> K>,
}

impl<'a, K: 'a, E: Keyed<K>> Iterator for Keys<'a, K, E> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|element| element.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, E: Keyed<K>> DoubleEndedIterator for Keys<'a, K, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|element| element.key())
    }
}

impl<'a, K: 'a, E: Keyed<K>> ExactSizeIterator for Keys<'a, K, E> {}

impl<'a, K: 'a, E: Keyed<K>> FusedIterator for Keys<'a, K, E> {}
