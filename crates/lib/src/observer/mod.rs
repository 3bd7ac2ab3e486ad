//! Change notification for observable lists.
//!
//! - [`ListChange`]: one contiguous insert, remove, update or move.
//! - [`ListObserver`]: receives changes synchronously, during the mutating call.
//! - [`ObserverRegistry`]: the observers attached to a list.
//! - [`Subscription`]: RAII guard that removes its observer on drop.
//!
//! # Invariants
//!
//! 1. A mutation that changes nothing emits nothing.
//! 2. Observers are notified in registration order, after the mutation has
//!    been applied and before the mutating call returns.
//! 3. Changes from a single mutation are delivered in the order the
//!    underlying positions changed.
//! 4. Observers cannot mutate the list they observe: they only receive a
//!    shared slice, and the list is mutably borrowed for the whole call.

pub mod change;
pub mod registry;

pub use change::{ChangeKind, ListChange};
pub use registry::{ListObserver, ObserverId, ObserverRegistry, Subscription};
