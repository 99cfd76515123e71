//! # onchain-std
//!
//! Standard-library primitives for code that validates ledger transactions:
//! ordered dictionaries, multi-asset values, time intervals, and the
//! canonical binary codec for the data trees they erase to.
//!
//! ## Overview
//!
//! - **Dict**: association list with strictly ascending unique keys, merged
//!   through caller-supplied union strategies
//! - **Value**: two-level dictionary of asset quantities that never stores a
//!   zero or an empty token map
//! - **Interval**: lower and upper bound over ledger-supplied timestamps
//! - **Codec**: canonical CBOR bytes, total decoding, diagnostic notation
//!
//! Everything is a pure function of its inputs. There is no I/O, no clock,
//! and no shared state.
//!
//! ## Usage
//!
//! ```rust
//! use onchain_std::{decode_value, diagnostic, serialize, AssetName, PolicyId, Value};
//!
//! let policy = PolicyId::new(vec![0x01]);
//! let value = Value::from_lovelace(2_000_000).add(policy, AssetName::new(b"ticket".to_vec()), 1);
//!
//! let bytes = serialize(&value);
//! assert_eq!(decode_value(&bytes).unwrap(), value);
//! println!("{}", diagnostic(&value));
//! ```
//!
//! ## Re-exports
//!
//! - `onchain_std::core` - Dict, strategies, Data and the codec
//! - `onchain_std::assets` - Value, PolicyId, AssetName
//! - `onchain_std::interval` - Interval and its bounds

pub mod codec;
pub mod error;

// Re-export component crates
pub use onchain_std_assets as assets;
pub use onchain_std_core as core;
pub use onchain_std_interval as interval;

pub use codec::{decode_value, decode_value_with};
pub use error::{Error, Result};

// Commonly used types
pub use onchain_std_assets::{AssetList, AssetName, PolicyId, Quantity, Tokens, Value, ValueError};
pub use onchain_std_core::{
    deserialize, deserialize_as, diagnostic, serialize, try_deserialize, BigInt, Data, DataHash,
    DecodeError, DecoderConfig, Dict, DictError, ExpectNoDuplicate, FromData, Resolution, ToData,
    UnionStrategy,
};
pub use onchain_std_interval::{Interval, IntervalBound, IntervalBoundType, PosixTime};
