//! # onchain-std core
//!
//! Pure primitives for ledger-side code: the ordered dictionary, the union
//! strategy protocol, and the canonical data codec.
//!
//! This crate contains no I/O and no shared state. Every operation is a
//! deterministic function of its inputs.
//!
//! ## Key Types
//!
//! - [`Dict`] - Association list with strictly ascending, unique keys
//! - [`UnionStrategy`] - What happens when two values meet under one key
//! - [`Data`] - The self-describing tree typed values erase to
//! - [`DataHash`] - Content identifier of a data tree
//!
//! ## Codec
//!
//! [`serialize`] produces the canonical CBOR bytes of a value; [`deserialize`]
//! parses them back and is the only fallible entry point. [`diagnostic`]
//! renders the RFC 8949 diagnostic notation for debugging.

pub mod canonical;
pub mod data;
pub mod decode;
pub mod diagnostic;
pub mod dict;
pub mod error;
pub mod hash;
pub mod strategy;

pub use canonical::{encode, serialize};
pub use data::{Data, FromData, ToData};
pub use decode::{
    deserialize, deserialize_as, deserialize_with, try_deserialize, try_deserialize_with,
    DecoderConfig,
};
pub use diagnostic::diagnostic;
pub use dict::Dict;
pub use error::{DecodeError, DictError};
pub use hash::DataHash;
pub use strategy::{ExpectNoDuplicate, Resolution, UnionStrategy};

pub use num_bigint::BigInt;
