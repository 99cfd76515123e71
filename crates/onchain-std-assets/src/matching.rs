//! Comparing a live value against a serialised one.
//!
//! Values arriving inside data (a datum field, a redeemer) could be decoded
//! with [`Value::try_from`] and compared with `==`, but decoding walks and
//! re-validates the whole tree. [`Value::matches`] instead peeks at the first
//! entry of the serialised map to pull lovelace out, and compares everything
//! else structurally, entry by entry, allocating nothing.

use num_bigint::BigInt;

use onchain_std_core::Data;

use crate::types::{AssetName, PolicyId};
use crate::value::{Quantity, Tokens, Value};

impl Value {
    /// Compare against a serialised value, with a caller-chosen rule for
    /// lovelace.
    ///
    /// Every asset other than lovelace itself must be identical on both
    /// sides, including other tokens filed under the empty policy. Lovelace
    /// is handed to `assert_lovelace(left, right)` instead, with a missing
    /// side taken as zero. This supports rules like exact equality, at-least,
    /// or within a tolerance.
    ///
    /// Returns `false` when `right` is not shaped like a serialised value.
    pub fn matches(
        &self,
        right: &Data,
        assert_lovelace: impl FnOnce(&Quantity, &Quantity) -> bool,
    ) -> bool {
        let zero = BigInt::from(0);
        let (left_lovelace, left_native, left_rest) = self.split_lovelace();

        let Some(entries) = right.as_map() else {
            return false;
        };
        let (right_native, right_rest) = match entries.split_first() {
            Some(((policy, tokens), rest)) if is_lovelace_key(policy) => match tokens.as_map() {
                Some(tokens) => (tokens, rest),
                None => return false,
            },
            _ => (&[][..], entries),
        };
        let (right_lovelace, right_native) = match right_native.split_first() {
            Some(((name, quantity), rest)) if is_lovelace_key(name) => match quantity.as_int() {
                Some(quantity) => (quantity, rest),
                None => return false,
            },
            _ => (&zero, right_native),
        };

        same_tokens(left_native, right_native)
            && same_assets(left_rest, right_rest)
            && assert_lovelace(left_lovelace.unwrap_or(&zero), right_lovelace)
    }

    /// Lovelace quantity, the other tokens under the empty policy, and the
    /// policies after it. The empty policy can only be the first entry and
    /// lovelace the first token under it, since empty bytes sort first.
    fn split_lovelace(
        &self,
    ) -> (
        Option<&Quantity>,
        &[(AssetName, Quantity)],
        &[(PolicyId, Tokens)],
    ) {
        match self.inner.as_pairs() {
            [(policy, tokens), rest @ ..] if policy.is_lovelace() => match tokens.as_pairs() {
                [(name, quantity), native @ ..] if name.is_lovelace() => {
                    (Some(quantity), native, rest)
                }
                native => (None, native, rest),
            },
            all => (None, &[], all),
        }
    }
}

fn is_lovelace_key(key: &Data) -> bool {
    matches!(key.as_bytes(), Some(b) if b.is_empty())
}

fn same_assets(left: &[(PolicyId, Tokens)], right: &[(Data, Data)]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|((policy, tokens), (key, value))| {
                key.as_bytes() == Some(policy.as_bytes())
                    && value
                        .as_map()
                        .map_or(false, |entries| same_tokens(tokens.as_pairs(), entries))
            })
}

fn same_tokens(left: &[(AssetName, Quantity)], right: &[(Data, Data)]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|((name, quantity), (key, value))| {
                key.as_bytes() == Some(name.as_bytes()) && value.as_int() == Some(quantity)
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onchain_std_core::ToData;

    fn policy(bytes: &[u8]) -> PolicyId {
        PolicyId::from(bytes)
    }

    fn name(bytes: &[u8]) -> AssetName {
        AssetName::from(bytes)
    }

    fn sample() -> Value {
        Value::from_lovelace(1_000_000)
            .add(policy(b"\x01"), name(b"token"), 5)
            .add(policy(b"\x02"), name(b""), 1)
    }

    #[test]
    fn test_matches_own_serialisation() {
        let value = sample();
        assert!(value.matches(&value.to_data(), |l, r| l == r));
    }

    #[test]
    fn test_lovelace_rule_is_applied() {
        let value = sample();
        let richer = value.clone().add(PolicyId::LOVELACE, AssetName::LOVELACE, 500);

        assert!(!value.matches(&richer.to_data(), |l, r| l == r));
        assert!(value.matches(&richer.to_data(), |l, r| l <= r));
        assert!(!richer.matches(&value.to_data(), |l, r| l <= r));
    }

    #[test]
    fn test_right_without_lovelace_counts_as_zero() {
        let value = sample();
        let right = value.clone().without_lovelace().to_data();

        let mut seen = None;
        assert!(value.matches(&right, |l, r| {
            seen = Some((l.clone(), r.clone()));
            true
        }));
        assert_eq!(seen, Some((BigInt::from(1_000_000), BigInt::from(0))));
    }

    #[test]
    fn test_other_assets_must_be_identical() {
        let value = sample();
        let more = value.clone().add(policy(b"\x01"), name(b"token"), 1);
        let extra = value.clone().add(policy(b"\x03"), name(b"x"), 1);

        assert!(!value.matches(&more.to_data(), |_, _| true));
        assert!(!value.matches(&extra.to_data(), |_, _| true));
    }

    #[test]
    fn test_rejects_non_value_shapes() {
        let value = sample();
        assert!(!value.matches(&Data::int(1), |_, _| true));

        // a token under the empty policy that the left side does not hold
        let bogus = Data::map(vec![(
            Data::bytes(b""),
            Data::map(vec![
                (Data::bytes(b""), Data::int(1)),
                (Data::bytes(b"x"), Data::int(1)),
            ]),
        )]);
        assert!(!Value::zero().matches(&bogus, |_, _| true));
    }

    #[test]
    fn test_other_tokens_under_empty_policy_are_compared() {
        let value = Value::from_lovelace(1).add(PolicyId::LOVELACE, name(b"x"), 5);

        assert!(value.matches(&value.to_data(), |l, r| l == r));
        assert!(!value.matches(&Value::from_lovelace(1).to_data(), |_, _| true));
        assert!(!Value::from_lovelace(1).matches(&value.to_data(), |_, _| true));

        let changed = Value::from_lovelace(1).add(PolicyId::LOVELACE, name(b"x"), 6);
        assert!(!value.matches(&changed.to_data(), |_, _| true));
    }

    #[test]
    fn test_empty_policy_without_lovelace() {
        let value = Value::from_asset(PolicyId::LOVELACE, name(b"x"), 5)
            .add(policy(b"\x01"), name(b"a"), 1);

        let mut seen = None;
        assert!(value.matches(&value.to_data(), |l, r| {
            seen = Some((l.clone(), r.clone()));
            true
        }));
        assert_eq!(seen, Some((BigInt::from(0), BigInt::from(0))));

        let richer = value.clone().add(PolicyId::LOVELACE, AssetName::LOVELACE, 7);
        assert!(value.matches(&richer.to_data(), |l, r| l <= r));
        assert!(!value.matches(&richer.to_data(), |l, r| l == r));
    }

    #[test]
    fn test_zero_matches_empty_map() {
        assert!(Value::zero().matches(&Data::map(vec![]), |l, r| l == r));
    }
}
