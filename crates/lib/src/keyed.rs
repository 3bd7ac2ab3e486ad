//! The capabilities an element needs to live in a keyed list.
//!
//! - [`Keyed`] exposes the element's key. Every list requires it.
//! - [`SameElement`] recognises a second handle to an element already in a
//!   sorted list, so re-adding it is a no-op rather than a duplicate-key error.
//!
//! Both are implemented for `Rc<T>`, `Arc<T>` and `&T` when `T: Keyed<K>`, which
//! is how shared application objects are usually listed.

use std::rc::Rc;
use std::sync::Arc;

/// An element that exposes a key.
///
/// The key must not change while the element is a member of a list. Lists do
/// not re-sort or re-index on their own; to change an element's key, remove it
/// and insert the updated element.
///
/// # Examples
///
/// ```
/// use keyed_list::Keyed;
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
/// let tunnel = Tunnel { name: "wg0".to_string() };
/// assert_eq!(tunnel.key(), "wg0");
/// ```
pub trait Keyed<K> {
    /// The element's key.
    fn key(&self) -> &K;
}

/// Identity comparison between two handles to list elements.
///
/// For shared pointers this is pointer identity, not value equality: two
/// distinct objects with equal contents are different elements.
pub trait SameElement {
    /// Returns true if `self` and `other` are the same element.
    fn same_element(&self, other: &Self) -> bool;
}

impl<K, T: Keyed<K> + ?Sized> Keyed<K> for Rc<T> {
    fn key(&self) -> &K {
        (**self).key()
    }
}

impl<K, T: Keyed<K> + ?Sized> Keyed<K> for Arc<T> {
    fn key(&self) -> &K {
        (**self).key()
    }
}

impl<K, T: Keyed<K> + ?Sized> Keyed<K> for &T {
    fn key(&self) -> &K {
        (**self).key()
    }
}

impl<T: ?Sized> SameElement for Rc<T> {
    fn same_element(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> SameElement for Arc<T> {
    fn same_element(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> SameElement for &T {
    fn same_element(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}
