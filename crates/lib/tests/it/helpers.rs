use std::cell::RefCell;
use std::rc::Rc;

use keyed_list::{
    Keyed, ListChange, ObservableKeyedArrayList, ObservableKeyedList,
    ObservableSortedKeyedArrayList, ObserverId, SameElement,
};

// ==========================
// ELEMENT TYPES
// ==========================

/// A shared application object, listed through `Rc` handles.
///
/// Identity is the allocation: two peers with the same id are different elements.
#[derive(Debug)]
pub struct Peer {
    pub id: i64,
    pub label: String,
}

impl Keyed<i64> for Peer {
    fn key(&self) -> &i64 {
        &self.id
    }
}

/// A plain value element; identity is value equality.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tunnel {
    pub name: String,
    pub port: u16,
}

impl Keyed<String> for Tunnel {
    fn key(&self) -> &String {
        &self.name
    }
}

impl SameElement for Tunnel {
    fn same_element(&self, other: &Self) -> bool {
        self == other
    }
}

pub type PeerList = ObservableSortedKeyedArrayList<i64, Rc<Peer>>;
pub type TunnelList = ObservableKeyedArrayList<String, Tunnel>;
pub type SortedTunnelList = ObservableSortedKeyedArrayList<String, Tunnel>;

pub fn peer(id: i64) -> Rc<Peer> {
    labeled_peer(id, &format!("peer-{id}"))
}

pub fn labeled_peer(id: i64, label: &str) -> Rc<Peer> {
    Rc::new(Peer {
        id,
        label: label.to_string(),
    })
}

pub fn tunnel(name: &str, port: u16) -> Tunnel {
    Tunnel {
        name: name.to_string(),
        port,
    }
}

/// Build a natural-order peer list from ids, panicking on duplicates
pub fn peer_list(ids: &[i64]) -> PeerList {
    PeerList::from_elements(ids.iter().map(|&id| peer(id))).expect("Failed to build peer list")
}

/// Keys of a peer slice in list order
pub fn ids(peers: &[Rc<Peer>]) -> Vec<i64> {
    peers.iter().map(|peer| peer.id).collect()
}

/// Names of a tunnel slice in list order
pub fn names(tunnels: &[Tunnel]) -> Vec<&str> {
    tunnels.iter().map(|tunnel| tunnel.name.as_str()).collect()
}

// ==========================
// OBSERVER HELPERS
// ==========================

/// Records every change delivered to it, in delivery order.
pub struct ChangeLog {
    id: ObserverId,
    changes: Rc<RefCell<Vec<ListChange>>>,
}

impl ChangeLog {
    /// Register a recording observer on `list`
    pub fn attach<K, E, L>(list: &L) -> Self
    where
        K: 'static,
        E: Keyed<K> + 'static,
        L: ObservableKeyedList<K, E>,
    {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let id = list.add_observer(move |_: &[E], change: &ListChange| {
            sink.borrow_mut().push(*change)
        });
        Self { id, changes }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Changes recorded so far
    pub fn changes(&self) -> Vec<ListChange> {
        self.changes.borrow().clone()
    }
}

/// Apply `change` to `mirror`, reading inserted and updated values from
/// `list`, the observed list's contents after the change.
pub fn apply_change<T: Clone>(mirror: &mut Vec<T>, list: &[T], change: &ListChange) {
    match *change {
        ListChange::Inserted { start, count } => {
            let inserted = list[start..start + count].to_vec();
            mirror.splice(start..start, inserted);
        }
        ListChange::Removed { start, count } => {
            mirror.drain(start..start + count);
        }
        ListChange::Updated { start, count } => {
            mirror[start..start + count].clone_from_slice(&list[start..start + count]);
        }
        ListChange::Moved { from, to, count } => {
            let moved: Vec<T> = mirror.drain(from..from + count).collect();
            mirror.splice(to..to, moved);
        }
    }
}

/// Attach an observer that keeps a mirror of the list's keys up to date
/// purely from change events.
pub fn key_mirror<K, E, L>(list: &L) -> Rc<RefCell<Vec<K>>>
where
    K: Clone + 'static,
    E: Keyed<K> + 'static,
    L: ObservableKeyedList<K, E>,
{
    let mirror = Rc::new(RefCell::new(
        list.elements()
            .iter()
            .map(|element| element.key().clone())
            .collect::<Vec<K>>(),
    ));
    let sink = Rc::clone(&mirror);
    list.add_observer(move |elements: &[E], change: &ListChange| {
        let keys: Vec<K> = elements.iter().map(|e| e.key().clone()).collect();
        apply_change(&mut sink.borrow_mut(), &keys, change);
    });
    mirror
}
