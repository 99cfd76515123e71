//! # onchain-std interval
//!
//! Intervals over ledger-supplied timestamps: construction, membership,
//! emptiness, hull, and intersection. Timestamps are opaque ordered integers
//! here; nothing reads a clock.

pub mod bound;
pub mod interval;

pub use bound::{IntervalBound, IntervalBoundType, PosixTime};
pub use interval::Interval;
