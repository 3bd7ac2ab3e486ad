//! Keyed lists: ordered sequences whose elements can also be found by key.
//!
//! # Traits
//!
//! - [`KeyedList`] - key lookups layered over positional access
//! - [`ObservableKeyedList`] - a keyed list that reports structural changes
//! - [`SortedKeyedList`] - a keyed list held in key order with one element per key
//!
//! # Implementations
//!
//! - [`ObservableKeyedArrayList`] - unsorted, duplicate keys allowed, O(n) lookup
//! - [`ObservableSortedKeyedArrayList`] - sorted and unique, O(log n) lookup
//!
//! Both deref to `[E]` for positional reads. There is no `DerefMut`: every
//! mutation goes through the list so it can notify its observers.

pub mod array;
#[cfg(feature = "serde")]
mod serde_impls;
pub mod sorted;
pub mod views;

pub use array::ObservableKeyedArrayList;
pub use sorted::ObservableSortedKeyedArrayList;
pub use views::{KeySet, Keys};

use std::fmt;

use crate::Result;
use crate::errors::KeyedListError;
use crate::keyed::Keyed;
use crate::observer::{ListObserver, ObserverId, ObserverRegistry, Subscription};
use crate::order::{Comparator, KeyOrder};

/// A sequence of keyed elements supporting lookup by key.
///
/// Implementors provide the element slice and the two index lookups; the
/// remaining queries are derived from them. Lookups return `None` when no
/// element has the key.
pub trait KeyedList<K, E: Keyed<K>> {
    /// The elements in list order.
    fn elements(&self) -> &[E];

    /// Index of the first element with `key`.
    fn index_of_key(&self, key: &K) -> Option<usize>;

    /// Index of the last element with `key`.
    fn last_index_of_key(&self, key: &K) -> Option<usize>;

    /// Returns true if some element has `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.index_of_key(key).is_some()
    }

    /// Returns true if every key in `keys` is present.
    ///
    /// Stops at the first missing key.
    fn contains_all_keys<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().all(|key| self.contains_key(key))
    }

    /// First element with `key`.
    fn get_by_key(&self, key: &K) -> Option<&E> {
        self.index_of_key(key)
            .and_then(|index| self.elements().get(index))
    }

    /// Last element with `key`.
    fn get_last_by_key(&self, key: &K) -> Option<&E> {
        self.last_index_of_key(key)
            .and_then(|index| self.elements().get(index))
    }

    /// First element with `key`, or [`KeyedListError::KeyNotFound`].
    fn get_required(&self, key: &K) -> Result<&E>
    where
        K: fmt::Debug,
    {
        self.get_by_key(key)
            .ok_or_else(|| KeyedListError::KeyNotFound {
                key: format!("{key:?}"),
            })
    }
}

/// A keyed list that notifies registered observers of structural changes.
pub trait ObservableKeyedList<K, E: Keyed<K>>: KeyedList<K, E> {
    /// The observers attached to this list.
    fn observers(&self) -> &ObserverRegistry<E>;

    /// Register an observer.
    fn add_observer(&self, observer: impl ListObserver<E> + 'static) -> ObserverId {
        self.observers().add(observer)
    }

    /// Unregister an observer. Returns false if `id` was not registered.
    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers().remove(id)
    }

    /// Register an observer for the lifetime of the returned guard.
    fn subscribe(&self, observer: impl ListObserver<E> + 'static) -> Subscription
    where
        E: 'static,
    {
        self.observers().subscribe(observer)
    }
}

/// A keyed list held in key order, with at most one element per key.
///
/// For indices `i < j`, `compare(list[i].key(), list[j].key())` is `Less`.
pub trait SortedKeyedList<K, E: Keyed<K>>: KeyedList<K, E> {
    /// The ordering applied to keys.
    fn key_order(&self) -> &KeyOrder<K>;

    /// The injected comparator, or `None` when keys use their natural order.
    fn comparator(&self) -> Option<&Comparator<K>> {
        self.key_order().comparator()
    }

    /// Smallest key in the list.
    fn first_key<'a>(&'a self) -> Result<&'a K>
    where
        E: 'a,
    {
        self.elements()
            .first()
            .map(|element| element.key())
            .ok_or(KeyedListError::EmptyCollection)
    }

    /// Largest key in the list.
    fn last_key<'a>(&'a self) -> Result<&'a K>
    where
        E: 'a,
    {
        self.elements()
            .last()
            .map(|element| element.key())
            .ok_or(KeyedListError::EmptyCollection)
    }

    /// Read-through view of the keys, in list order.
    fn key_set(&self) -> KeySet<'_, K, E> {
        KeySet::new(self.elements(), self.key_order())
    }

    /// The elements themselves, read-only.
    fn values(&self) -> &[E] {
        self.elements()
    }
}

/// A sorted keyed list that also reports structural changes.
pub trait ObservableSortedKeyedList<K, E: Keyed<K>>:
    ObservableKeyedList<K, E> + SortedKeyedList<K, E>
{
}

impl<K, E, L> ObservableSortedKeyedList<K, E> for L
where
    E: Keyed<K>,
    L: ObservableKeyedList<K, E> + SortedKeyedList<K, E>,
{
}
