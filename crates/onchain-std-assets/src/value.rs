//! Multi-asset values.
//!
//! A [`Value`] maps policies to token maps to quantities. Two invariants hold
//! for every value this module hands out:
//!
//! 1. no quantity is zero: an entry whose quantity reaches zero is removed
//! 2. no token map is empty: a policy whose last token is removed goes too
//!
//! Lovelace is stored like any other asset, under the empty policy and the
//! empty name. Only the convenience accessors know about it.
//!
//! Some operations come in pairs that compute the same thing at different
//! cost. [`Value::reduce`] folds without building the intermediate list that
//! [`Value::flatten`] returns. [`Value::matches`] compares against a data tree
//! directly, where decoding it into a `Value` first would allocate and
//! re-validate the whole right-hand side.

use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use onchain_std_core::strategy::sum_nonzero;
use onchain_std_core::{Data, Dict, DictError, ExpectNoDuplicate, FromData, Resolution, ToData};

use crate::error::ValueError;
use crate::types::{AssetName, PolicyId};

/// Signed amount of one asset.
pub type Quantity = BigInt;

/// Token map of a single policy.
pub type Tokens = Dict<AssetName, Quantity>;

/// Shape accepted by [`Value::from_asset_list`].
pub type AssetList = Vec<(PolicyId, Vec<(AssetName, Quantity)>)>;

pub(crate) fn is_zero(quantity: &Quantity) -> bool {
    quantity.sign() == Sign::NoSign
}

/// A bag of assets with non-zero, possibly negative, quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Value {
    pub(crate) inner: Dict<PolicyId, Tokens>,
}

impl Value {
    /// The additive identity.
    pub fn zero() -> Self {
        Self {
            inner: Dict::empty(),
        }
    }

    /// A value holding only lovelace.
    pub fn from_lovelace(quantity: impl Into<Quantity>) -> Self {
        Self::from_asset(PolicyId::LOVELACE, AssetName::LOVELACE, quantity)
    }

    /// A value holding a single asset. A zero quantity yields [`Value::zero`].
    pub fn from_asset(policy: PolicyId, name: AssetName, quantity: impl Into<Quantity>) -> Self {
        let quantity = quantity.into();
        if is_zero(&quantity) {
            return Self::zero();
        }
        let tokens = Dict::empty().insert(name, quantity);
        Self {
            inner: Dict::empty().insert(policy, tokens),
        }
    }

    /// Import a nested asset list supplied from outside.
    ///
    /// Policies may come in any order but must be unique. Under each policy
    /// the token list must be non-empty, strictly ascending by name, and free
    /// of zero quantities.
    pub fn from_asset_list(assets: AssetList) -> Result<Self, ValueError> {
        let result = Self::import_asset_list(assets);
        if let Err(e) = &result {
            tracing::debug!("rejected asset list: {}", e);
        }
        result
    }

    fn import_asset_list(assets: AssetList) -> Result<Self, ValueError> {
        let mut inner = Dict::empty();

        for (policy, tokens) in assets {
            if tokens.is_empty() {
                return Err(ValueError::EmptyAssetList(policy));
            }

            let tokens = match Dict::from_ascending_pairs_with(tokens, |q| !is_zero(q)) {
                Ok(tokens) => tokens,
                Err(DictError::OrderingViolation { .. }) => {
                    return Err(ValueError::UnsortedAssetNames(policy))
                }
                Err(_) => return Err(ValueError::ZeroQuantity(policy)),
            };

            inner = inner
                .try_insert_with(policy.clone(), tokens, ExpectNoDuplicate)
                .map_err(|_| ValueError::DuplicatePolicy(policy))?;
        }

        Ok(Self { inner })
    }

    /// Add `delta` of a single asset. This is the fast path for one asset;
    /// it never walks more than the affected token map.
    pub fn add(self, policy: PolicyId, name: AssetName, delta: impl Into<Quantity>) -> Self {
        let delta = delta.into();
        if is_zero(&delta) {
            return self;
        }

        let (tokens, rest) = self.inner.pop(&policy);
        let tokens = tokens
            .unwrap_or_default()
            .insert_with(name, delta, sum_nonzero());

        let inner = if tokens.is_empty() {
            rest
        } else {
            rest.insert(policy, tokens)
        };
        Self { inner }
    }

    /// Combine two values asset by asset. Commutative and associative, with
    /// [`Value::zero`] as identity and [`Value::negate`] as inverse.
    pub fn merge(self, other: Self) -> Self {
        let inner = self.inner.union_with(
            other.inner,
            |_: &PolicyId, left: Tokens, right: Tokens| {
                let tokens = left.union_with(right, sum_nonzero());
                if tokens.is_empty() {
                    Resolution::Discard
                } else {
                    Resolution::Keep(tokens)
                }
            },
        );
        Self { inner }
    }

    /// Flip the sign of every quantity.
    pub fn negate(self) -> Self {
        Self {
            inner: self.inner.map(|_, tokens| tokens.map(|_, q| -q)),
        }
    }

    /// Quantity of one asset, zero when absent.
    pub fn quantity_of(&self, policy: &PolicyId, name: &AssetName) -> Quantity {
        self.inner
            .get(policy)
            .and_then(|tokens| tokens.get(name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn lovelace_of(&self) -> Quantity {
        self.quantity_of(&PolicyId::LOVELACE, &AssetName::LOVELACE)
    }

    /// Drop the lovelace entry, keeping every other asset.
    pub fn without_lovelace(self) -> Self {
        let (native, inner) = self.inner.pop(&PolicyId::LOVELACE);
        match native.map(|tokens| tokens.delete(&AssetName::LOVELACE)) {
            Some(tokens) if !tokens.is_empty() => Self {
                inner: inner.insert(PolicyId::LOVELACE, tokens),
            },
            _ => Self { inner },
        }
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_empty()
    }

    /// Policies present, in ascending order (lovelace first when present).
    pub fn policies(&self) -> Vec<PolicyId> {
        self.inner.keys().cloned().collect()
    }

    /// Token map of `policy`; empty when the policy is absent.
    pub fn tokens(&self, policy: &PolicyId) -> Tokens {
        self.inner.get(policy).cloned().unwrap_or_default()
    }

    pub fn to_dict(self) -> Dict<PolicyId, Tokens> {
        self.inner
    }

    /// Whether `policy` holds exactly one token, with quantity one.
    pub fn has_any_nft(&self, policy: &PolicyId) -> bool {
        self.inner.get(policy).map_or(false, is_single_nft)
    }

    /// Like [`has_any_nft`](Self::has_any_nft), and additionally nothing but
    /// lovelace sits next to it.
    ///
    /// This looks at the shape of the outer map instead of scanning it. The
    /// two-entry case relies on lovelace's empty policy sorting before every
    /// other policy: if lovelace is present it can only be the first entry.
    pub fn has_any_nft_strict(&self, policy: &PolicyId) -> bool {
        match self.inner.as_pairs() {
            [(p, tokens)] => p == policy && is_single_nft(tokens),
            [(native, lovelace), (p, tokens)] => {
                native.is_lovelace()
                    && matches!(lovelace.as_pairs(), [(name, _)] if name.is_lovelace())
                    && p == policy
                    && is_single_nft(tokens)
            }
            _ => false,
        }
    }

    /// Whether exactly one unit of the asset is present.
    pub fn has_nft(&self, policy: &PolicyId, name: &AssetName) -> bool {
        self.quantity_of(policy, name) == BigInt::from(1)
    }

    /// Like [`has_nft`](Self::has_nft), and additionally nothing but lovelace
    /// sits next to it. Builds the expected data tree and defers to
    /// [`matches`](Self::matches) instead of taking the value apart.
    pub fn has_nft_strict(&self, policy: &PolicyId, name: &AssetName) -> bool {
        let expected = Data::map(vec![(
            policy.to_data(),
            Data::map(vec![(name.to_data(), Data::int(1))]),
        )]);
        self.matches(&expected, |_, _| true)
    }

    /// Keep only the policies listed in `mask`.
    pub fn restricted_to(self, mask: &[PolicyId]) -> Self {
        Self {
            inner: self.inner.filter(|policy, _| mask.contains(policy)),
        }
    }

    /// Every asset as a `(policy, name, quantity)` triple, ascending.
    pub fn flatten(&self) -> Vec<(PolicyId, AssetName, Quantity)> {
        self.flatten_with(|policy, name, quantity| {
            Resolution::Keep((policy.clone(), name.clone(), quantity.clone()))
        })
    }

    /// Map every asset through `f`, dropping those it resolves to
    /// [`Resolution::Discard`]. Order is ascending.
    pub fn flatten_with<R>(
        &self,
        mut f: impl FnMut(&PolicyId, &AssetName, &Quantity) -> Resolution<R>,
    ) -> Vec<R> {
        let mut flat = self.reduce(Vec::new(), |policy, name, quantity, mut acc| {
            if let Resolution::Keep(r) = f(policy, name, quantity) {
                acc.push(r);
            }
            acc
        });
        // reduce visits the last asset first
        flat.reverse();
        flat
    }

    /// Right fold over every asset without materialising a list: the last
    /// asset is combined first.
    pub fn reduce<A>(
        &self,
        zero: A,
        mut f: impl FnMut(&PolicyId, &AssetName, &Quantity, A) -> A,
    ) -> A {
        self.inner.foldr(zero, |policy, tokens, acc| {
            tokens.foldr(acc, |name, quantity, acc| f(policy, name, quantity, acc))
        })
    }
}

fn is_single_nft(tokens: &Tokens) -> bool {
    match tokens.as_pairs() {
        [(_, quantity)] => *quantity == BigInt::from(1),
        _ => false,
    }
}

impl ToData for Value {
    fn to_data(&self) -> Data {
        self.inner.to_data()
    }
}

/// Accepts exactly what [`Value::from_asset_list`] accepts.
impl FromData for Value {
    fn from_data(data: &Data) -> Option<Self> {
        Value::try_from(data).ok()
    }
}

impl TryFrom<&Data> for Value {
    type Error = ValueError;

    fn try_from(data: &Data) -> Result<Self, Self::Error> {
        let malformed = |what: &str| ValueError::Malformed(what.to_string());

        let entries = data.as_map().ok_or_else(|| malformed("expected map"))?;
        let mut assets = Vec::with_capacity(entries.len());
        for (policy, tokens) in entries {
            let policy = PolicyId::from_data(policy).ok_or_else(|| malformed("invalid policy"))?;
            let tokens = tokens
                .as_map()
                .ok_or_else(|| malformed("expected token map"))?
                .iter()
                .map(|(name, quantity)| {
                    Some((AssetName::from_data(name)?, quantity.as_int()?.clone()))
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| malformed("invalid token entry"))?;
            assets.push((policy, tokens));
        }

        Value::from_asset_list(assets)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let assets = AssetList::deserialize(deserializer)?;
        Value::from_asset_list(assets).map_err(serde::de::Error::custom)
    }
}
