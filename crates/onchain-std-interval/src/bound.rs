//! Interval bounds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use onchain_std_core::{Data, FromData, ToData};

/// A timestamp, as supplied by the ledger. Never read from a clock.
pub type PosixTime = i64;

/// Where a bound sits. The derived order is the order on the extended line:
/// negative infinity, then finite points ascending, then positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntervalBoundType {
    NegativeInfinity,
    Finite(PosixTime),
    PositiveInfinity,
}

/// One end of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalBound {
    pub bound_type: IntervalBoundType,
    pub is_inclusive: bool,
}

impl IntervalBound {
    pub const fn new(bound_type: IntervalBoundType, is_inclusive: bool) -> Self {
        Self {
            bound_type,
            is_inclusive,
        }
    }

    pub const fn inclusive(bound_type: IntervalBoundType) -> Self {
        Self::new(bound_type, true)
    }

    pub const fn exclusive(bound_type: IntervalBoundType) -> Self {
        Self::new(bound_type, false)
    }

    /// Order two lower bounds by how much they exclude: at the same point an
    /// exclusive bound is greater than an inclusive one.
    pub fn cmp_as_lower(&self, other: &Self) -> Ordering {
        self.bound_type
            .cmp(&other.bound_type)
            .then_with(|| other.is_inclusive.cmp(&self.is_inclusive))
    }

    /// Order two upper bounds by how much they include: at the same point an
    /// exclusive bound is smaller than an inclusive one.
    pub fn cmp_as_upper(&self, other: &Self) -> Ordering {
        self.bound_type
            .cmp(&other.bound_type)
            .then_with(|| self.is_inclusive.cmp(&other.is_inclusive))
    }

    /// Whether `point` lies above this bound read as a lower bound.
    pub(crate) fn admits_from_below(&self, point: PosixTime) -> bool {
        match self.bound_type {
            IntervalBoundType::NegativeInfinity => true,
            IntervalBoundType::Finite(low) if self.is_inclusive => low <= point,
            IntervalBoundType::Finite(low) => low < point,
            IntervalBoundType::PositiveInfinity => false,
        }
    }

    /// Whether `point` lies below this bound read as an upper bound.
    pub(crate) fn admits_from_above(&self, point: PosixTime) -> bool {
        match self.bound_type {
            IntervalBoundType::NegativeInfinity => false,
            IntervalBoundType::Finite(high) if self.is_inclusive => point <= high,
            IntervalBoundType::Finite(high) => point < high,
            IntervalBoundType::PositiveInfinity => true,
        }
    }
}

impl ToData for IntervalBoundType {
    fn to_data(&self) -> Data {
        match self {
            IntervalBoundType::NegativeInfinity => Data::constr(0, Vec::new()),
            IntervalBoundType::Finite(t) => Data::constr(1, vec![t.to_data()]),
            IntervalBoundType::PositiveInfinity => Data::constr(2, Vec::new()),
        }
    }
}

impl FromData for IntervalBoundType {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_constr()? {
            (0, []) => Some(IntervalBoundType::NegativeInfinity),
            (1, [t]) => PosixTime::from_data(t).map(IntervalBoundType::Finite),
            (2, []) => Some(IntervalBoundType::PositiveInfinity),
            _ => None,
        }
    }
}

impl ToData for IntervalBound {
    fn to_data(&self) -> Data {
        Data::constr(
            0,
            vec![self.bound_type.to_data(), self.is_inclusive.to_data()],
        )
    }
}

impl FromData for IntervalBound {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_constr()? {
            (0, [bound_type, is_inclusive]) => Some(Self {
                bound_type: IntervalBoundType::from_data(bound_type)?,
                is_inclusive: bool::from_data(is_inclusive)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalBoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalBoundType::NegativeInfinity => f.write_str("-inf"),
            IntervalBoundType::Finite(t) => write!(f, "{}", t),
            IntervalBoundType::PositiveInfinity => f.write_str("+inf"),
        }
    }
}
