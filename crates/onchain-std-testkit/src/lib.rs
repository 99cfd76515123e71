//! # onchain-std Testkit
//!
//! Testing utilities for onchain-std.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: data trees with their exact canonical bytes and
//!   diagnostic strings
//! - **Generators**: Proptest strategies for data, dictionaries, values, and
//!   intervals
//! - **Fixtures**: A fixed set of policies and wallets for readable tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use onchain_std_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, hex);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use onchain_std_assets::Value;
//! use onchain_std_testkit::generators::value;
//!
//! proptest! {
//!     #[test]
//!     fn negate_is_an_involution(v in value()) {
//!         prop_assert_eq!(v.clone().negate().negate(), v);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use onchain_std_testkit::fixtures::AssetFixture;
//!
//! let fixture = AssetFixture::new();
//! let wallet = fixture.wallet_with_nft(2_000_000);
//! assert!(wallet.has_nft(&fixture.nft_policy, &fixture.nft));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::AssetFixture;
pub use generators::{data, dict, value, value_invariants_hold, DictOp};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
