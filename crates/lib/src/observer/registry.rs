//! Observer registration and synchronous change delivery.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::change::ListChange;

/// Receives structural changes from an observable list.
///
/// `list` is the list's contents after the mutation that produced `change`.
/// Any `Fn(&[E], &ListChange)` closure is an observer.
pub trait ListObserver<E> {
    /// Called synchronously from inside the mutating call.
    fn on_list_changed(&self, list: &[E], change: &ListChange);
}

impl<E, F> ListObserver<E> for F
where
    F: Fn(&[E], &ListChange),
{
    fn on_list_changed(&self, list: &[E], change: &ListChange) {
        self(list, change)
    }
}

/// Handle identifying a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

type Slot<E> = (ObserverId, Rc<dyn ListObserver<E>>);

/// Type-erased view of the slot table so a [`Subscription`] can detach
/// itself without knowing the element type.
trait SlotTable {
    fn detach(&self, id: ObserverId) -> bool;
    fn contains(&self, id: ObserverId) -> bool;
}

impl<E> SlotTable for RefCell<Vec<Slot<E>>> {
    fn detach(&self, id: ObserverId) -> bool {
        let mut slots = self.borrow_mut();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        before != slots.len()
    }

    fn contains(&self, id: ObserverId) -> bool {
        self.borrow().iter().any(|(slot_id, _)| *slot_id == id)
    }
}

/// The set of observers attached to one list.
///
/// Observers are notified in registration order. Each notification round
/// works on a snapshot of the registered observers, so an observer may
/// register or remove observers (itself included) while being notified;
/// the change takes effect from the next round.
pub struct ObserverRegistry<E> {
    slots: Rc<RefCell<Vec<Slot<E>>>>,
    next_id: Cell<u64>,
}

impl<E> ObserverRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Register `observer`, returning the id used to remove it.
    pub fn add(&self, observer: impl ListObserver<E> + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push((id, Rc::new(observer)));
        debug!(%id, observers = self.len(), "Registered list observer");
        id
    }

    /// Remove the observer registered under `id`.
    ///
    /// Returns false if no such observer is registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let removed = self.slots.detach(id);
        if removed {
            debug!(%id, observers = self.len(), "Removed list observer");
        }
        removed
    }

    /// Register `observer` for as long as the returned guard lives.
    pub fn subscribe(&self, observer: impl ListObserver<E> + 'static) -> Subscription
    where
        E: 'static,
    {
        let id = self.add(observer);
        let slots: Rc<dyn SlotTable> = self.slots.clone();
        Subscription {
            id,
            slots: Some(Rc::downgrade(&slots)),
        }
    }

    /// Returns true if `id` is currently registered.
    pub fn contains(&self, id: ObserverId) -> bool {
        self.slots.contains(id)
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns true if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Deliver `change` to every registered observer.
    pub(crate) fn notify(&self, list: &[E], change: ListChange) {
        let snapshot: Vec<Rc<dyn ListObserver<E>>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        if snapshot.is_empty() {
            return;
        }

        trace!(?change, observers = snapshot.len(), "Notifying list observers");
        for observer in snapshot {
            observer.on_list_changed(list, &change);
        }
    }
}

impl<E> Default for ObserverRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ObserverRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

/// RAII guard that removes its observer when dropped.
///
/// Dropping the guard after the list itself is gone is harmless.
#[must_use = "dropping a Subscription immediately removes its observer"]
pub struct Subscription {
    id: ObserverId,
    slots: Option<Weak<dyn SlotTable>>,
}

impl Subscription {
    /// The id of the guarded observer.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Returns true while the observer is still registered with a live list.
    pub fn is_active(&self) -> bool {
        self.slots
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|slots| slots.contains(self.id))
    }

    /// Remove the observer now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Release the guard without removing the observer.
    ///
    /// The observer then stays registered until removed by id or until the
    /// list is dropped.
    pub fn into_id(mut self) -> ObserverId {
        self.slots = None;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.take().and_then(|weak| weak.upgrade()) {
            if slots.detach(self.id) {
                debug!(id = %self.id, "Subscription dropped, observer removed");
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
