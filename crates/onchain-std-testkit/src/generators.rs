//! Proptest generators for property-based testing.
//!
//! Key and quantity spaces are kept deliberately small so that generated
//! dictionaries and values collide, cancel, and merge often.

use proptest::prelude::*;

use onchain_std_assets::{AssetName, PolicyId, Quantity, Value};
use onchain_std_core::{BigInt, Data, Dict};
use onchain_std_interval::{Interval, IntervalBound, IntervalBoundType};

/// Byte strings up to `max_len`.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Integers both inside and outside the 64-bit head range.
pub fn big_int() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        any::<i64>().prop_map(BigInt::from),
        any::<i128>().prop_map(BigInt::from),
        any::<u64>().prop_map(|n| BigInt::from(n) * BigInt::from(u64::MAX)),
    ]
}

/// Constructor indices that survive a round trip through the decoder.
pub fn constr_index() -> impl Strategy<Value = u64> {
    0u64..=127
}

/// Arbitrary data trees, nested a few levels deep.
pub fn data() -> impl Strategy<Value = Data> {
    let leaf = prop_oneof![
        big_int().prop_map(Data::Int),
        bytes(100).prop_map(Data::Bytes),
    ];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            (constr_index(), prop::collection::vec(inner.clone(), 0..6))
                .prop_map(|(index, fields)| Data::constr(index, fields)),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Data::List),
            prop::collection::vec((inner.clone(), inner), 0..6).prop_map(Data::Map),
        ]
    })
}

/// Short keys over a tiny alphabet.
pub fn dict_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..=2)
}

/// Dictionaries built from unordered, possibly duplicated pairs.
pub fn dict() -> impl Strategy<Value = Dict<Vec<u8>, i64>> {
    prop::collection::vec((dict_key(), -100i64..100), 0..12).prop_map(Dict::from_pairs)
}

/// One step applied to a dictionary.
#[derive(Debug, Clone)]
pub enum DictOp {
    Insert(Vec<u8>, i64),
    Delete(Vec<u8>),
    Union(Dict<Vec<u8>, i64>),
}

impl DictOp {
    pub fn apply(self, dict: Dict<Vec<u8>, i64>) -> Dict<Vec<u8>, i64> {
        match self {
            DictOp::Insert(key, value) => dict.insert(key, value),
            DictOp::Delete(key) => dict.delete(&key),
            DictOp::Union(right) => dict.union(right),
        }
    }
}

pub fn dict_op() -> impl Strategy<Value = DictOp> {
    prop_oneof![
        (dict_key(), any::<i64>()).prop_map(|(k, v)| DictOp::Insert(k, v)),
        dict_key().prop_map(DictOp::Delete),
        dict().prop_map(DictOp::Union),
    ]
}

/// Non-lovelace policies.
pub fn policy_id() -> impl Strategy<Value = PolicyId> {
    prop::collection::vec(0u8..4, 1..=2).prop_map(PolicyId::new)
}

pub fn asset_name() -> impl Strategy<Value = AssetName> {
    prop::collection::vec(0u8..4, 0..=2).prop_map(AssetName::new)
}

/// Small signed quantities, zero included.
pub fn quantity() -> impl Strategy<Value = Quantity> {
    (-3i64..=3).prop_map(BigInt::from)
}

/// A single asset. The empty policy carries lovelace and, less often,
/// other names.
pub fn asset() -> impl Strategy<Value = (PolicyId, AssetName, Quantity)> {
    prop_oneof![
        2 => quantity().prop_map(|q| (PolicyId::LOVELACE, AssetName::LOVELACE, q)),
        1 => (asset_name(), quantity()).prop_map(|(name, q)| (PolicyId::LOVELACE, name, q)),
        4 => (policy_id(), asset_name(), quantity()),
    ]
}

/// Values reached by a sequence of single-asset additions.
pub fn value() -> impl Strategy<Value = Value> {
    prop::collection::vec(asset(), 0..10).prop_map(|assets| {
        assets
            .into_iter()
            .fold(Value::zero(), |value, (policy, name, quantity)| {
                value.add(policy, name, quantity)
            })
    })
}

pub fn bound_type() -> impl Strategy<Value = IntervalBoundType> {
    prop_oneof![
        1 => Just(IntervalBoundType::NegativeInfinity),
        6 => (-20i64..20).prop_map(IntervalBoundType::Finite),
        1 => Just(IntervalBoundType::PositiveInfinity),
    ]
}

pub fn interval() -> impl Strategy<Value = Interval> {
    (bound_type(), any::<bool>(), bound_type(), any::<bool>()).prop_map(
        |(lower, lower_inclusive, upper, upper_inclusive)| {
            Interval::new(
                IntervalBound::new(lower, lower_inclusive),
                IntervalBound::new(upper, upper_inclusive),
            )
        },
    )
}

/// Whether every invariant of a value holds.
pub fn value_invariants_hold(value: &Value) -> bool {
    value
        .policies()
        .iter()
        .all(|policy| !value.tokens(policy).is_empty())
        && value
            .flatten()
            .iter()
            .all(|(_, _, quantity)| *quantity != BigInt::from(0))
}
