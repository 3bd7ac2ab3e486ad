//!
//! keyed-list: ordered lists whose elements can also be found by key, with
//! structural change notification for incremental view updates.
//!
//! ## Core Concepts
//!
//! * **Keyed elements (`keyed::Keyed`)**: Any element exposing a key. Shared handles
//!   (`Rc<T>`, `Arc<T>`, `&T`) are keyed when `T` is.
//! * **Keyed lists (`list::KeyedList`)**: Positional lists with first/last lookup by key.
//! * **Observable lists (`list::ObservableKeyedList`)**: Lists that report every insert,
//!   remove, update and move to registered observers, synchronously, so a view can
//!   update incrementally instead of re-reading the whole list.
//! * **Sorted lists (`list::SortedKeyedList`)**: Lists held in key order with one element
//!   per key, ordered naturally or by an injected comparator (`order::KeyOrder`).
//!
//! Two array-backed implementations are provided:
//!
//! * **`ObservableKeyedArrayList`**: no ordering or uniqueness constraints, linear lookup.
//! * **`ObservableSortedKeyedArrayList`**: sorted and unique, binary-search lookup and
//!   insertion, index-checked positional insertion and replacement.
//!
//! The lists are single-threaded: observers are held in `Rc`, and every
//! notification is delivered on the calling thread before the mutating call
//! returns.

pub mod errors;
pub mod keyed;
pub mod list;
pub mod observer;
pub mod order;

pub use errors::KeyedListError;
pub use keyed::{Keyed, SameElement};
pub use list::{
    KeySet, KeyedList, Keys, ObservableKeyedArrayList, ObservableKeyedList,
    ObservableSortedKeyedArrayList, ObservableSortedKeyedList, SortedKeyedList,
};
pub use observer::{
    ChangeKind, ListChange, ListObserver, ObserverId, ObserverRegistry, Subscription,
};
pub use order::{Comparator, KeyOrder};

/// Result type used throughout the keyed-list library.
pub type Result<T> = std::result::Result<T, KeyedListError>;
