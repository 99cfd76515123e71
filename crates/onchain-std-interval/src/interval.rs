//! Intervals of timestamps.
//!
//! An interval is a lower and an upper bound, each possibly infinite and
//! possibly exclusive. Emptiness is not canonical: many different intervals
//! contain no point, they are not equal to each other, and
//! [`Interval::is_empty`] is the only way to ask.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use onchain_std_core::{Data, FromData, ToData};

use crate::bound::{IntervalBound, IntervalBoundType, PosixTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub lower_bound: IntervalBound,
    pub upper_bound: IntervalBound,
}

impl Interval {
    pub const fn new(lower_bound: IntervalBound, upper_bound: IntervalBound) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }

    /// Every point.
    pub const fn everything() -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::NegativeInfinity),
            IntervalBound::inclusive(IntervalBoundType::PositiveInfinity),
        )
    }

    /// No point: the bounds are crossed.
    pub const fn empty() -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::PositiveInfinity),
            IntervalBound::inclusive(IntervalBoundType::NegativeInfinity),
        )
    }

    /// `[from, +inf]`
    pub const fn after(from: PosixTime) -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::Finite(from)),
            IntervalBound::inclusive(IntervalBoundType::PositiveInfinity),
        )
    }

    /// `(from, +inf]`
    pub const fn entirely_after(from: PosixTime) -> Self {
        Self::new(
            IntervalBound::exclusive(IntervalBoundType::Finite(from)),
            IntervalBound::inclusive(IntervalBoundType::PositiveInfinity),
        )
    }

    /// `[-inf, to]`
    pub const fn before(to: PosixTime) -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::NegativeInfinity),
            IntervalBound::inclusive(IntervalBoundType::Finite(to)),
        )
    }

    /// `[-inf, to)`
    pub const fn entirely_before(to: PosixTime) -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::NegativeInfinity),
            IntervalBound::exclusive(IntervalBoundType::Finite(to)),
        )
    }

    /// `[from, to]`
    pub const fn between(from: PosixTime, to: PosixTime) -> Self {
        Self::new(
            IntervalBound::inclusive(IntervalBoundType::Finite(from)),
            IntervalBound::inclusive(IntervalBoundType::Finite(to)),
        )
    }

    /// `(from, to)`
    pub const fn entirely_between(from: PosixTime, to: PosixTime) -> Self {
        Self::new(
            IntervalBound::exclusive(IntervalBoundType::Finite(from)),
            IntervalBound::exclusive(IntervalBoundType::Finite(to)),
        )
    }

    pub fn contains(&self, point: PosixTime) -> bool {
        self.lower_bound.admits_from_below(point) && self.upper_bound.admits_from_above(point)
    }

    /// Whether no integer timestamp lies in the interval.
    pub fn is_empty(&self) -> bool {
        use IntervalBoundType::Finite;

        let lower = &self.lower_bound;
        let upper = &self.upper_bound;

        match lower.bound_type.cmp(&upper.bound_type) {
            Ordering::Greater => true,
            Ordering::Equal => match lower.bound_type {
                Finite(_) => !(lower.is_inclusive && upper.is_inclusive),
                // no timestamp sits at an infinity
                _ => true,
            },
            Ordering::Less => match (lower.bound_type, upper.bound_type) {
                (Finite(low), Finite(high)) if !lower.is_inclusive && !upper.is_inclusive => {
                    low.checked_add(1) == Some(high)
                }
                _ => false,
            },
        }
    }

    /// Whether every point of the interval is strictly greater than `point`.
    /// An unbounded lower end never is.
    pub fn is_entirely_after(&self, point: PosixTime) -> bool {
        match self.lower_bound.bound_type {
            IntervalBoundType::Finite(low) if self.lower_bound.is_inclusive => point < low,
            IntervalBoundType::Finite(low) => point <= low,
            _ => false,
        }
    }

    /// Whether every point of the interval is strictly less than `point`.
    /// An unbounded upper end never is.
    pub fn is_entirely_before(&self, point: PosixTime) -> bool {
        match self.upper_bound.bound_type {
            IntervalBoundType::Finite(high) if self.upper_bound.is_inclusive => high < point,
            IntervalBoundType::Finite(high) => high <= point,
            _ => false,
        }
    }

    /// Smallest interval containing both.
    pub fn hull(&self, other: &Self) -> Self {
        let lower_bound = match self.lower_bound.cmp_as_lower(&other.lower_bound) {
            Ordering::Greater => other.lower_bound,
            _ => self.lower_bound,
        };
        let upper_bound = match self.upper_bound.cmp_as_upper(&other.upper_bound) {
            Ordering::Less => other.upper_bound,
            _ => self.upper_bound,
        };
        Self::new(lower_bound, upper_bound)
    }

    /// Largest interval contained in both. May be empty.
    pub fn intersection(&self, other: &Self) -> Self {
        let lower_bound = match self.lower_bound.cmp_as_lower(&other.lower_bound) {
            Ordering::Less => other.lower_bound,
            _ => self.lower_bound,
        };
        let upper_bound = match self.upper_bound.cmp_as_upper(&other.upper_bound) {
            Ordering::Greater => other.upper_bound,
            _ => self.upper_bound,
        };
        Self::new(lower_bound, upper_bound)
    }
}

impl ToData for Interval {
    fn to_data(&self) -> Data {
        Data::constr(
            0,
            vec![self.lower_bound.to_data(), self.upper_bound.to_data()],
        )
    }
}

impl FromData for Interval {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_constr()? {
            (0, [lower, upper]) => Some(Self::new(
                IntervalBound::from_data(lower)?,
                IntervalBound::from_data(upper)?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower_bound.is_inclusive { '[' } else { '(' };
        let close = if self.upper_bound.is_inclusive { ']' } else { ')' };
        write!(
            f,
            "{}{}, {}{}",
            open, self.lower_bound.bound_type, self.upper_bound.bound_type, close
        )
    }
}
