//! Ordered key-value dictionary.
//!
//! A [`Dict`] is an association list whose keys are pairwise distinct and
//! strictly ascending. The invariant is established by every constructor and
//! preserved by every operation; there is no public access to the backing
//! store.
//!
//! Operations are value-in, value-out: mutators consume the dictionary and
//! return a new one, so no mutation is ever observable through another
//! handle. Clone first if the old value is still needed.
//!
//! The backing store is a sorted `Vec`. Lookups binary search it, merges walk
//! both sides once.

use std::cmp::Ordering;
use std::convert::Infallible;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DictError;
use crate::strategy::{into_ok, Resolution, UnionStrategy};

/// A dictionary with strictly ascending, unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dict<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K, V> Dict<K, V> {
    /// The dictionary with no entries.
    pub const fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + '_ {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.pairs.iter().map(|(k, _)| k)
    }

    /// Values, ordered by their keys.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.pairs.iter().map(|(_, v)| v)
    }

    /// Borrow the entries as an ascending slice.
    pub fn as_pairs(&self) -> &[(K, V)] {
        &self.pairs
    }

    /// Take the entries out as an ascending list.
    pub fn to_pairs(self) -> Vec<(K, V)> {
        self.pairs
    }

    /// First entry, i.e. the one with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.pairs.first().map(|(k, v)| (k, v))
    }

    /// Left fold over entries in ascending key order.
    pub fn foldl<A>(&self, zero: A, mut f: impl FnMut(&K, &V, A) -> A) -> A {
        self.pairs.iter().fold(zero, |acc, (k, v)| f(k, v, acc))
    }

    /// Right fold: the last entry is combined first.
    pub fn foldr<A>(&self, zero: A, mut f: impl FnMut(&K, &V, A) -> A) -> A {
        self.pairs.iter().rev().fold(zero, |acc, (k, v)| f(k, v, acc))
    }

    /// Keep the entries satisfying `predicate`.
    pub fn filter(self, mut predicate: impl FnMut(&K, &V) -> bool) -> Self {
        let pairs = self
            .pairs
            .into_iter()
            .filter(|(k, v)| predicate(k, v))
            .collect();
        Self { pairs }
    }

    /// Transform every value; keys and order are untouched.
    pub fn map<W>(self, mut f: impl FnMut(&K, V) -> W) -> Dict<K, W> {
        let pairs = self
            .pairs
            .into_iter()
            .map(|(k, v)| {
                let w = f(&k, v);
                (k, w)
            })
            .collect();
        Dict { pairs }
    }

    /// First key (in ascending order) bound to `value`.
    pub fn find(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.pairs.iter().find(|(_, v)| v == value).map(|(k, _)| k)
    }
}

impl<K: Ord, V> Dict<K, V> {
    /// Build from arbitrary pairs. Input order does not matter; when a key
    /// appears more than once, its first occurrence wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut pairs: Vec<(K, V)> = pairs.into_iter().collect();
        // stable: equal keys stay in input order, dedup keeps the first
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { pairs }
    }

    /// Build from pairs the caller claims are strictly ascending. The claim is
    /// checked in one pass.
    pub fn from_ascending_pairs(pairs: Vec<(K, V)>) -> Result<Self, DictError> {
        Self::from_ascending_pairs_with(pairs, |_| true)
    }

    /// Like [`from_ascending_pairs`](Self::from_ascending_pairs), additionally
    /// requiring every value to satisfy `predicate`.
    pub fn from_ascending_pairs_with(
        pairs: Vec<(K, V)>,
        predicate: impl Fn(&V) -> bool,
    ) -> Result<Self, DictError> {
        for (index, (key, value)) in pairs.iter().enumerate() {
            if !predicate(value) {
                return Err(DictError::ValuePredicateViolation { index });
            }
            if index > 0 && pairs[index - 1].0 >= *key {
                return Err(DictError::OrderingViolation { index });
            }
        }
        Ok(Self { pairs })
    }

    fn position(&self, key: &K) -> Result<usize, usize> {
        self.pairs.binary_search_by(|(k, _)| k.cmp(key))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).ok().map(|i| &self.pairs[i].1)
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.position(key).is_ok()
    }

    /// Value at `key`, or the result of `default` when absent.
    pub fn get_or_else(&self, key: &K, default: impl FnOnce() -> V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or_else(default)
    }

    /// Insert, overwriting any value already bound to `key`.
    pub fn insert(mut self, key: K, value: V) -> Self {
        match self.position(&key) {
            Ok(i) => self.pairs[i].1 = value,
            Err(i) => self.pairs.insert(i, (key, value)),
        }
        self
    }

    /// Insert, resolving a collision with `strategy`. The strategy receives
    /// the incoming value on the left and the existing one on the right.
    pub fn insert_with<S>(self, key: K, value: V, strategy: S) -> Self
    where
        S: UnionStrategy<K, V, Error = Infallible>,
    {
        into_ok(self.try_insert_with(key, value, strategy))
    }

    /// Fallible form of [`insert_with`](Self::insert_with).
    pub fn try_insert_with<S>(mut self, key: K, value: V, strategy: S) -> Result<Self, S::Error>
    where
        S: UnionStrategy<K, V>,
    {
        match self.position(&key) {
            Ok(i) => {
                let (existing_key, existing) = self.pairs.remove(i);
                if let Resolution::Keep(v) = strategy.resolve(&existing_key, value, existing)? {
                    self.pairs.insert(i, (existing_key, v));
                }
            }
            Err(i) => self.pairs.insert(i, (key, value)),
        }
        Ok(self)
    }

    /// Remove `key`. Absent keys are a no-op.
    pub fn delete(self, key: &K) -> Self {
        self.pop(key).1
    }

    /// Remove `key`, returning its value alongside the remaining dictionary.
    pub fn pop(mut self, key: &K) -> (Option<V>, Self) {
        match self.position(key) {
            Ok(i) => {
                let (_, value) = self.pairs.remove(i);
                (Some(value), self)
            }
            Err(_) => (None, self),
        }
    }

    /// Left-biased union: colliding keys keep the value from `self`.
    pub fn union(self, right: Self) -> Self {
        self.union_with(right, |_: &K, left: V, _: V| Resolution::Keep(left))
    }

    /// Union delegating every collision to `strategy`, called with the value
    /// from `self` on the left.
    pub fn union_with<S>(self, right: Self, strategy: S) -> Self
    where
        S: UnionStrategy<K, V, Error = Infallible>,
    {
        into_ok(self.try_union_with(right, strategy))
    }

    /// Fallible form of [`union_with`](Self::union_with).
    pub fn try_union_with<S>(self, right: Self, strategy: S) -> Result<Self, S::Error>
    where
        S: UnionStrategy<K, V>,
    {
        let mut merged = Vec::with_capacity(self.pairs.len() + right.pairs.len());
        let mut left = self.pairs.into_iter().peekable();
        let mut right = right.pairs.into_iter().peekable();

        loop {
            let ordering = match (left.peek(), right.peek()) {
                (Some((l, _)), Some((r, _))) => l.cmp(r),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };

            match ordering {
                Ordering::Less => merged.extend(left.next()),
                Ordering::Greater => merged.extend(right.next()),
                Ordering::Equal => {
                    if let (Some((key, l)), Some((_, r))) = (left.next(), right.next()) {
                        if let Resolution::Keep(v) = strategy.resolve(&key, l, r)? {
                            merged.push((key, v));
                        }
                    }
                }
            }
        }

        Ok(Self { pairs: merged })
    }
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Ord, V> TryFrom<Vec<(K, V)>> for Dict<K, V> {
    type Error = DictError;

    fn try_from(pairs: Vec<(K, V)>) -> Result<Self, Self::Error> {
        Self::from_ascending_pairs(pairs)
    }
}

impl<K, V> From<Dict<K, V>> for Vec<(K, V)> {
    fn from(dict: Dict<K, V>) -> Self {
        dict.pairs
    }
}

impl<K, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<K: Serialize, V: Serialize> Serialize for Dict<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.pairs)
    }
}

impl<'de, K, V> Deserialize<'de> for Dict<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Self::from_ascending_pairs(pairs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{keep_right, sum, sum_nonzero, ExpectNoDuplicate};

    fn key(s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    fn abc() -> Dict<Vec<u8>, i64> {
        Dict::empty()
            .insert(key("b"), 2)
            .insert(key("a"), 1)
            .insert(key("c"), 3)
    }

    #[test]
    fn test_insert_keeps_order() {
        let d = abc();
        let keys: Vec<_> = d.keys().cloned().collect();
        assert_eq!(keys, vec![key("a"), key("b"), key("c")]);
        assert_eq!(d.size(), 3);
    }

    #[test]
    fn test_insert_overwrites() {
        let d = abc().insert(key("b"), 20);
        assert_eq!(d.get(&key("b")), Some(&20));
        assert_eq!(d.size(), 3);
    }

    #[test]
    fn test_shorter_key_sorts_first() {
        let d = Dict::empty()
            .insert(key("ab"), 2)
            .insert(key("a"), 1)
            .insert(Vec::new(), 0);
        let keys: Vec<_> = d.keys().cloned().collect();
        assert_eq!(keys, vec![Vec::new(), key("a"), key("ab")]);
    }

    #[test]
    fn test_get_and_has_key() {
        let d = abc();
        assert_eq!(d.get(&key("a")), Some(&1));
        assert_eq!(d.get(&key("z")), None);
        assert!(d.has_key(&key("c")));
        assert!(!d.has_key(&key("")));
        assert_eq!(d.get_or_else(&key("z"), || 42), 42);
        assert_eq!(d.get_or_else(&key("a"), || 42), 1);
    }

    #[test]
    fn test_delete_and_pop() {
        let d = abc().delete(&key("b")).delete(&key("missing"));
        assert_eq!(d.keys().cloned().collect::<Vec<_>>(), vec![key("a"), key("c")]);

        let (popped, rest) = d.pop(&key("a"));
        assert_eq!(popped, Some(1));
        assert_eq!(rest.size(), 1);

        let (popped, rest) = rest.pop(&key("a"));
        assert_eq!(popped, None);
        assert_eq!(rest.size(), 1);
    }

    #[test]
    fn test_from_pairs_first_occurrence_wins() {
        let d = Dict::from_pairs(vec![
            (key("b"), 1),
            (key("a"), 2),
            (key("b"), 3),
            (key("a"), 4),
        ]);
        assert_eq!(d.to_pairs(), vec![(key("a"), 2), (key("b"), 1)]);
    }

    #[test]
    fn test_from_ascending_pairs() {
        let ok = Dict::from_ascending_pairs(vec![(key("a"), 1), (key("b"), 2)]);
        assert!(ok.is_ok());

        let unsorted = Dict::from_ascending_pairs(vec![(key("b"), 1), (key("a"), 2)]);
        assert_eq!(unsorted, Err(DictError::OrderingViolation { index: 1 }));

        let duplicate = Dict::from_ascending_pairs(vec![(key("a"), 1), (key("a"), 2)]);
        assert_eq!(duplicate, Err(DictError::OrderingViolation { index: 1 }));
    }

    #[test]
    fn test_from_ascending_pairs_with_predicate() {
        let result = Dict::from_ascending_pairs_with(
            vec![(key("a"), 1), (key("b"), 0)],
            |v: &i64| *v != 0,
        );
        assert_eq!(result, Err(DictError::ValuePredicateViolation { index: 1 }));
    }

    #[test]
    fn test_union_is_left_biased() {
        let left = Dict::from_pairs(vec![(key("a"), 1), (key("b"), 2)]);
        let right = Dict::from_pairs(vec![(key("b"), 20), (key("c"), 30)]);
        let merged = left.union(right);
        assert_eq!(
            merged.to_pairs(),
            vec![(key("a"), 1), (key("b"), 2), (key("c"), 30)]
        );
    }

    #[test]
    fn test_union_with_strategies() {
        let left = Dict::from_pairs(vec![(key("a"), 1), (key("b"), 2)]);
        let right = Dict::from_pairs(vec![(key("a"), -1), (key("b"), 5)]);

        let summed = left.clone().union_with(right.clone(), sum());
        assert_eq!(summed.to_pairs(), vec![(key("a"), 0), (key("b"), 7)]);

        let pruned = left.clone().union_with(right.clone(), sum_nonzero());
        assert_eq!(pruned.to_pairs(), vec![(key("b"), 7)]);

        let right_biased = left.union_with(right, keep_right());
        assert_eq!(right_biased.to_pairs(), vec![(key("a"), -1), (key("b"), 5)]);
    }

    #[test]
    fn test_try_union_with_expect_no_duplicate() {
        let left = Dict::from_pairs(vec![(key("a"), 1)]);
        let disjoint = Dict::from_pairs(vec![(key("b"), 2)]);
        let overlapping = Dict::from_pairs(vec![(key("a"), 2)]);

        assert!(left.clone().try_union_with(disjoint, ExpectNoDuplicate).is_ok());
        assert_eq!(
            left.try_union_with(overlapping, ExpectNoDuplicate),
            Err(DictError::DuplicateKey)
        );
    }

    #[test]
    fn test_insert_with_may_discard() {
        let d = Dict::from_pairs(vec![(key("a"), 3)]);
        let d = d.insert_with(key("a"), -3, sum_nonzero());
        assert!(d.is_empty());

        let d = d.insert_with(key("a"), 5, sum_nonzero());
        assert_eq!(d.get(&key("a")), Some(&5));
    }

    #[test]
    fn test_insert_with_argument_order() {
        // existing = 1, incoming = 2
        let d = Dict::from_pairs(vec![(key("a"), 1)]);
        let d = d.insert_with(key("a"), 2, |_: &Vec<u8>, l: i32, r: i32| {
            Resolution::Keep(l * 10 + r)
        });
        assert_eq!(d.get(&key("a")), Some(&21));
    }

    #[test]
    fn test_filter_map_fold() {
        let d = abc();
        let odd = d.clone().filter(|_, v| v % 2 == 1);
        assert_eq!(odd.size(), 2);

        let doubled = d.clone().map(|_, v| v * 2);
        assert_eq!(doubled.values().copied().collect::<Vec<_>>(), vec![2, 4, 6]);

        let left = d.foldl(String::new(), |k, _, acc| acc + std::str::from_utf8(k).unwrap());
        let right = d.foldr(String::new(), |k, _, acc| acc + std::str::from_utf8(k).unwrap());
        assert_eq!(left, "abc");
        assert_eq!(right, "cba");
    }

    #[test]
    fn test_find() {
        let d = Dict::from_pairs(vec![(key("a"), 1), (key("b"), 2), (key("c"), 2)]);
        assert_eq!(d.find(&2), Some(&key("b")));
        assert_eq!(d.find(&9), None);
    }

    #[test]
    fn test_serde_revalidates_order() {
        let d = abc();
        let json = serde_json::to_string(&d).unwrap();
        let back: Dict<Vec<u8>, i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);

        let unsorted = "[[[98],1],[[97],2]]";
        assert!(serde_json::from_str::<Dict<Vec<u8>, i64>>(unsorted).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_from_pairs_keeps_first_occurrence(
                pairs in prop::collection::vec((0u8..8, any::<i32>()), 0..32),
            ) {
                let dict = Dict::from_pairs(pairs.clone());

                let mut distinct: Vec<u8> = pairs.iter().map(|(k, _)| *k).collect();
                distinct.sort();
                distinct.dedup();
                prop_assert_eq!(dict.size(), distinct.len());

                for (k, v) in dict.iter() {
                    let first = pairs.iter().find(|(pk, _)| pk == k).map(|(_, pv)| pv);
                    prop_assert_eq!(Some(v), first);
                }
            }

            #[test]
            fn test_delete_removes_only_its_key(
                pairs in prop::collection::vec((0u8..8, any::<i32>()), 0..16),
                victim in 0u8..8,
            ) {
                let dict = Dict::from_pairs(pairs);
                let deleted = dict.clone().delete(&victim);

                prop_assert!(!deleted.has_key(&victim));
                for (k, v) in deleted.iter() {
                    prop_assert_eq!(dict.get(k), Some(v));
                }
            }
        }
    }
}
