//! Property-based invariant tests for the keyed lists.
//!
//! These hold for **any** sequence of operations:
//!
//! 1. A sorted list is strictly ordered by key after every operation.
//! 2. A sorted list holds the same keys as a naive `BTreeSet` model.
//! 3. Key lookup agrees with a linear scan.
//! 4. Replaying the emitted changes onto a copy reproduces the list.
//! 5. Rejected operations leave the list and its observers untouched.
//! 6. Unsorted first/last lookups agree with a linear scan.

use std::collections::BTreeSet;
use std::rc::Rc;

use keyed_list::{KeyedList, SortedKeyedList};
use proptest::prelude::*;

use crate::helpers::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Insert(usize, i64),
    Set(usize, i64),
    Remove(usize),
    RemoveKey(i64),
    RemoveRange(usize, usize),
    RetainOdd,
    Clear,
}

fn key() -> impl Strategy<Value = i64> {
    // Narrow range so duplicates are common.
    -20i64..20
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => key().prop_map(Op::Add),
        2 => (0usize..24, key()).prop_map(|(i, k)| Op::Insert(i, k)),
        2 => (0usize..24, key()).prop_map(|(i, k)| Op::Set(i, k)),
        2 => (0usize..24).prop_map(Op::Remove),
        2 => key().prop_map(Op::RemoveKey),
        1 => (0usize..24, 0usize..6).prop_map(|(start, len)| Op::RemoveRange(start, start + len)),
        1 => Just(Op::RetainOdd),
        1 => Just(Op::Clear),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 0..80)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn apply(list: &mut PeerList, op: &Op) {
    // Errors are expected here; the properties only look at the resulting state.
    match *op {
        Op::Add(id) => {
            let _ = list.add(peer(id));
        }
        Op::Insert(index, id) => {
            let _ = list.insert(index, peer(id));
        }
        Op::Set(index, id) => {
            let _ = list.set(index, peer(id));
        }
        Op::Remove(index) => {
            let _ = list.remove(index);
        }
        Op::RemoveKey(id) => {
            list.remove_key(&id);
        }
        Op::RemoveRange(start, end) => {
            let _ = list.remove_range(start..end);
        }
        Op::RetainOdd => {
            list.retain(|p| p.id % 2 != 0);
        }
        Op::Clear => list.clear(),
    }
}

fn is_strictly_sorted(keys: &[i64]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Sorted and unique after every operation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sorted_after_every_operation(ops in ops()) {
        let mut list = PeerList::new();
        for op in &ops {
            apply(&mut list, op);
            let keys = ids(&list);
            prop_assert!(is_strictly_sorted(&keys), "not sorted after {:?}: {:?}", op, keys);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Adds match a naive set
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adds_match_btree_set(keys in proptest::collection::vec(key(), 0..60)) {
        let mut list = PeerList::new();
        let mut naive = BTreeSet::new();
        for &id in &keys {
            let inserted = list.add(peer(id)).is_ok();
            prop_assert_eq!(inserted, naive.insert(id));
        }

        prop_assert_eq!(ids(&list), naive.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(list.first_key().ok(), naive.first());
        prop_assert_eq!(list.last_key().ok(), naive.last());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Lookup agrees with a linear scan
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lookup_matches_linear_scan(ops in ops(), probe in key()) {
        let mut list = PeerList::new();
        for op in &ops {
            apply(&mut list, op);
        }

        let expected = list.iter().position(|p| p.id == probe);
        prop_assert_eq!(list.index_of_key(&probe), expected);
        prop_assert_eq!(list.last_index_of_key(&probe), expected);
        prop_assert_eq!(list.key_set().contains(&probe), expected.is_some());
        match list.search(&probe) {
            Ok(index) => {
                prop_assert_eq!(list[index].id, probe);
            }
            Err(point) => {
                prop_assert!(list[..point].iter().all(|p| p.id < probe));
                prop_assert!(list[point..].iter().all(|p| p.id > probe));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Change events replay to the same list
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sorted_events_replay(ops in ops()) {
        let mut list = PeerList::new();
        let mirror = key_mirror(&list);
        for op in &ops {
            apply(&mut list, op);
            prop_assert_eq!(&*mirror.borrow(), &ids(&list));
        }
    }

    #[test]
    fn unsorted_events_replay(
        seed in proptest::collection::vec(0u16..8, 0..10),
        edits in proptest::collection::vec((0usize..4, 0usize..12, 0u16..8), 0..40),
    ) {
        let mut list: TunnelList = seed.iter().map(|&n| tunnel(&n.to_string(), n)).collect();
        let mirror = key_mirror(&list);
        for (kind, index, n) in edits {
            let element = tunnel(&n.to_string(), n);
            let _ = match kind {
                0 => list.insert(index, element).map(|_| ()),
                1 => list.set(index, element).map(|_| ()),
                2 => list.remove(index).map(|_| ()),
                _ => list.move_item(index % 6, n as usize % 6),
            };
            let names: Vec<String> = list.iter().map(|t| t.name.clone()).collect();
            prop_assert_eq!(&*mirror.borrow(), &names);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rejected operations change nothing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_insert_is_silent(
        keys in proptest::collection::vec(key(), 0..30),
        index in 0usize..32,
        id in key(),
    ) {
        let mut list = PeerList::new();
        let _ = list.add_all(keys.iter().map(|&k| peer(k)));
        let before = ids(&list);
        let log = ChangeLog::attach(&list);

        if list.insert(index, peer(id)).is_err() {
            prop_assert_eq!(ids(&list), before);
            prop_assert!(log.changes().is_empty());
        } else {
            prop_assert_eq!(list.index_of_key(&id), Some(index));
            prop_assert_eq!(log.changes().len(), 1);
        }
    }

    #[test]
    fn same_instance_never_duplicates(keys in proptest::collection::vec(key(), 1..30)) {
        let peers: Vec<_> = keys.iter().map(|&k| peer(k)).collect();
        let mut list = PeerList::new();
        for p in &peers {
            let _ = list.add(Rc::clone(p));
        }
        let before = ids(&list);
        for p in &peers {
            if list.iter().any(|q| Rc::ptr_eq(p, q)) {
                prop_assert_eq!(list.add(Rc::clone(p)), Ok(false));
            }
        }
        prop_assert_eq!(ids(&list), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Unsorted first/last lookups
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unsorted_first_and_last(
        names in proptest::collection::vec("[a-d]", 0..20),
        probe in "[a-e]",
    ) {
        let list: TunnelList = names
            .iter()
            .enumerate()
            .map(|(port, name)| tunnel(name, port as u16))
            .collect();

        prop_assert_eq!(list.index_of_key(&probe), names.iter().position(|n| *n == probe));
        prop_assert_eq!(list.last_index_of_key(&probe), names.iter().rposition(|n| *n == probe));
        prop_assert_eq!(list.contains_key(&probe), names.contains(&probe));
    }
}
