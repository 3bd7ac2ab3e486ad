//! serde support for the list types.
//!
//! Both lists serialize as a plain sequence of elements. Observers are not
//! serialized. A sorted list deserializes under natural key ordering and
//! rejects input holding two distinct elements with the same key; input need
//! not already be sorted.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ObservableKeyedArrayList, ObservableSortedKeyedArrayList};
use crate::keyed::{Keyed, SameElement};

impl<K, E: Serialize> Serialize for ObservableKeyedArrayList<K, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de, K, E: Deserialize<'de>> Deserialize<'de> for ObservableKeyedArrayList<K, E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<E>::deserialize(deserializer).map(Self::from)
    }
}

impl<K, E: Serialize> Serialize for ObservableSortedKeyedArrayList<K, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de, K, E> Deserialize<'de> for ObservableSortedKeyedArrayList<K, E>
where
    K: Ord,
    E: Keyed<K> + SameElement + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SortedVisitor<K, E> {
            marker: PhantomData<fn() -> (K, E)>,
        }

        impl<'de, K, E> Visitor<'de> for SortedVisitor<K, E>
        where
            K: Ord,
            E: Keyed<K> + SameElement + Deserialize<'de>,
        {
            type Value = ObservableSortedKeyedArrayList<K, E>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of elements with unique keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = ObservableSortedKeyedArrayList::with_capacity(
                    seq.size_hint().unwrap_or(0).min(4096),
                );
                while let Some(element) = seq.next_element::<E>()? {
                    list.add(element).map_err(de::Error::custom)?;
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(SortedVisitor {
            marker: PhantomData,
        })
    }
}
