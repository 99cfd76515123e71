//! Collision strategies for merge-like operations.
//!
//! Every operation that can see the same key twice ([`Dict::union_with`],
//! [`Dict::insert_with`], and the asset arithmetic built on top of them)
//! hands the collision to a [`UnionStrategy`]. The strategy either keeps the
//! key with a combined value or discards the key entirely.
//!
//! Plain closures `Fn(&K, V, V) -> Resolution<V>` are strategies that cannot
//! fail. Strategies that refuse to merge implement the trait directly with a
//! real error type, and are only accepted by the `try_` variants.
//!
//! [`Dict::union_with`]: crate::Dict::union_with
//! [`Dict::insert_with`]: crate::Dict::insert_with

use std::convert::Infallible;
use std::ops::Add;

use crate::error::DictError;

/// Outcome of a key collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<V> {
    /// Keep the key, bound to this value.
    Keep(V),
    /// Drop the key from the result.
    Discard,
}

impl<V> Resolution<V> {
    /// Keep `value` unless it equals `V::default()`.
    pub fn keep_nonzero(value: V) -> Self
    where
        V: Default + PartialEq,
    {
        if value == V::default() {
            Resolution::Discard
        } else {
            Resolution::Keep(value)
        }
    }

    /// Convert into an `Option`, `Discard` becoming `None`.
    pub fn into_option(self) -> Option<V> {
        match self {
            Resolution::Keep(v) => Some(v),
            Resolution::Discard => None,
        }
    }
}

/// Decides what happens when two values meet under the same key.
pub trait UnionStrategy<K, V> {
    type Error;

    fn resolve(&self, key: &K, left: V, right: V) -> Result<Resolution<V>, Self::Error>;
}

impl<K, V, F> UnionStrategy<K, V> for F
where
    F: Fn(&K, V, V) -> Resolution<V>,
{
    type Error = Infallible;

    fn resolve(&self, key: &K, left: V, right: V) -> Result<Resolution<V>, Infallible> {
        Ok(self(key, left, right))
    }
}

/// Rejects every collision with [`DictError::DuplicateKey`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectNoDuplicate;

impl<K, V> UnionStrategy<K, V> for ExpectNoDuplicate {
    type Error = DictError;

    fn resolve(&self, _key: &K, _left: V, _right: V) -> Result<Resolution<V>, DictError> {
        Err(DictError::DuplicateKey)
    }
}

/// Keep the left value.
pub fn keep_left<K, V>() -> impl Fn(&K, V, V) -> Resolution<V> + Copy {
    |_: &K, left: V, _: V| Resolution::Keep(left)
}

/// Keep the right value.
pub fn keep_right<K, V>() -> impl Fn(&K, V, V) -> Resolution<V> + Copy {
    |_: &K, _: V, right: V| Resolution::Keep(right)
}

/// Keep the sum of both values.
pub fn sum<K, V>() -> impl Fn(&K, V, V) -> Resolution<V> + Copy
where
    V: Add<Output = V>,
{
    |_: &K, left: V, right: V| Resolution::Keep(left + right)
}

/// Keep the sum of both values, discarding the key when the sum is zero.
pub fn sum_nonzero<K, V>() -> impl Fn(&K, V, V) -> Resolution<V> + Copy
where
    V: Add<Output = V> + Default + PartialEq,
{
    |_: &K, left: V, right: V| Resolution::keep_nonzero(left + right)
}

pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_strategies() {
        assert_eq!(keep_left()(&"k", 1, 2), Resolution::Keep(1));
        assert_eq!(keep_right()(&"k", 1, 2), Resolution::Keep(2));
        assert_eq!(sum()(&"k", 1, 2), Resolution::Keep(3));
        assert_eq!(sum_nonzero()(&"k", 1, 2), Resolution::Keep(3));
        assert_eq!(sum_nonzero()(&"k", 2, -2), Resolution::Discard);
    }

    #[test]
    fn test_closure_is_infallible_strategy() {
        let pick_max = |_: &u8, l: i32, r: i32| Resolution::Keep(l.max(r));
        assert_eq!(pick_max.resolve(&0, 4, 9), Ok(Resolution::Keep(9)));
    }

    #[test]
    fn test_expect_no_duplicate_rejects() {
        let result = UnionStrategy::<u8, i32>::resolve(&ExpectNoDuplicate, &1, 1, 1);
        assert_eq!(result, Err(DictError::DuplicateKey));
    }

    #[test]
    fn test_resolution_into_option() {
        assert_eq!(Resolution::Keep(5).into_option(), Some(5));
        assert_eq!(Resolution::<i32>::Discard.into_option(), None);
    }
}
