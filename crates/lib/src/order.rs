//! Key ordering strategies for sorted lists.
//!
//! A sorted list either orders its keys naturally (`K: Ord`) or with a
//! comparator injected at construction. The choice is made once, when the
//! list is built; afterwards every comparison goes through [`KeyOrder::compare`].

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A shared comparison function over keys.
pub type Comparator<K> = Rc<dyn Fn(&K, &K) -> Ordering>;

/// How a sorted list orders its keys.
///
/// The comparator must be a total order. Lists built with an inconsistent
/// comparator keep their elements but lookups become unreliable.
pub enum KeyOrder<K> {
    /// The key type's own `Ord` implementation.
    Natural(fn(&K, &K) -> Ordering),
    /// An injected comparator.
    Custom(Comparator<K>),
}

impl<K: Ord> KeyOrder<K> {
    /// Order keys by their `Ord` implementation.
    pub fn natural() -> Self {
        KeyOrder::Natural(K::cmp)
    }
}

impl<K> KeyOrder<K> {
    /// Order keys with `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_list::KeyOrder;
    /// use std::cmp::Ordering;
    ///
    /// let reversed = KeyOrder::by(|a: &u32, b: &u32| b.cmp(a));
    /// assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    /// assert!(reversed.comparator().is_some());
    /// ```
    pub fn by(compare: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        KeyOrder::Custom(Rc::new(compare))
    }

    /// Compare two keys.
    pub fn compare(&self, a: &K, b: &K) -> Ordering {
        match self {
            KeyOrder::Natural(cmp) => cmp(a, b),
            KeyOrder::Custom(cmp) => cmp(a, b),
        }
    }

    /// The injected comparator, or `None` for natural ordering.
    pub fn comparator(&self) -> Option<&Comparator<K>> {
        match self {
            KeyOrder::Natural(_) => None,
            KeyOrder::Custom(cmp) => Some(cmp),
        }
    }

    /// Returns true if keys use their natural ordering.
    pub fn is_natural(&self) -> bool {
        matches!(self, KeyOrder::Natural(_))
    }
}

impl<K> Clone for KeyOrder<K> {
    fn clone(&self) -> Self {
        match self {
            KeyOrder::Natural(cmp) => KeyOrder::Natural(*cmp),
            KeyOrder::Custom(cmp) => KeyOrder::Custom(Rc::clone(cmp)),
        }
    }
}

impl<K: Ord> Default for KeyOrder<K> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K> fmt::Debug for KeyOrder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrder::Natural(_) => f.write_str("KeyOrder::Natural"),
            KeyOrder::Custom(_) => f.write_str("KeyOrder::Custom"),
        }
    }
}
