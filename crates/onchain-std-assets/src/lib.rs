//! # onchain-std assets
//!
//! Multi-asset [`Value`] arithmetic on top of the core [`Dict`].
//!
//! A value is a two-level dictionary, policy to asset name to quantity, that
//! never stores a zero quantity or an empty token map. Lovelace lives under
//! the reserved empty policy and name.
//!
//! ```rust
//! use onchain_std_assets::{AssetName, PolicyId, Value};
//!
//! let policy = PolicyId::new(vec![0xac, 0xab]);
//! let name = AssetName::new(vec![0xbe, 0xef]);
//!
//! let value = Value::from_lovelace(123)
//!     .add(policy.clone(), name.clone(), 321)
//!     .add(policy, name, -321);
//!
//! assert_eq!(value, Value::from_lovelace(123));
//! ```
//!
//! [`Dict`]: onchain_std_core::Dict

pub mod error;
pub mod matching;
pub mod types;
pub mod value;

pub use error::ValueError;
pub use types::{AssetName, PolicyId};
pub use value::{AssetList, Quantity, Tokens, Value};
