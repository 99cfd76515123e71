//! Error types for the onchain-std core.

use thiserror::Error;

/// Errors raised by the invariant-checking [`Dict`](crate::Dict) constructors
/// and by strategies that refuse to merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    #[error("keys are not in strictly ascending order at index {index}")]
    OrderingViolation { index: usize },

    #[error("value at index {index} does not satisfy the predicate")]
    ValuePredicateViolation { index: usize },

    #[error("duplicate key")]
    DuplicateKey,
}

/// Reasons a byte sequence is rejected by the data decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("trailing bytes: consumed {consumed} of {total}")]
    TrailingBytes { consumed: usize, total: usize },

    #[error("unsupported major type: {0}")]
    UnsupportedMajorType(u8),

    #[error("invalid additional info: {0}")]
    InvalidAdditionalInfo(u8),

    #[error("reserved tag: {0}")]
    ReservedTag(u64),

    #[error("unsupported tag: {0}")]
    UnsupportedTag(u64),

    #[error("indefinite byte string chunk is not a definite byte string")]
    InvalidChunk,

    #[error("bignum payload is not a byte string")]
    InvalidBignum,

    #[error("constructor fields are not a list")]
    InvalidFields,

    #[error("unexpected break byte")]
    UnexpectedBreak,

    #[error("nesting depth exceeds {0}")]
    DepthExceeded(usize),
}
