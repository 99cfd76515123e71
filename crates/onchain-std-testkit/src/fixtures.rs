//! Test fixtures and helpers.
//!
//! A small fixed universe of policies and asset names, and wallets built from
//! them, for tests that need realistic values without writing out bytes.

use onchain_std_assets::{AssetList, AssetName, PolicyId, Value};
use onchain_std_core::BigInt;

/// Named policies and assets shared across tests.
#[derive(Debug, Clone)]
pub struct AssetFixture {
    /// A fungible token policy.
    pub token_policy: PolicyId,
    /// A policy minting one-of-a-kind tokens.
    pub nft_policy: PolicyId,
    pub token: AssetName,
    pub nft: AssetName,
}

impl AssetFixture {
    pub fn new() -> Self {
        Self {
            token_policy: PolicyId::new(vec![0x11; PolicyId::HASH_LENGTH]),
            nft_policy: PolicyId::new(vec![0x22; PolicyId::HASH_LENGTH]),
            token: AssetName::new(b"HOSKY".to_vec()),
            nft: AssetName::new(b"SpaceBud42".to_vec()),
        }
    }

    /// Lovelace only.
    pub fn ada_only(&self, lovelace: i64) -> Value {
        Value::from_lovelace(lovelace)
    }

    /// Lovelace plus `amount` fungible tokens.
    pub fn wallet(&self, lovelace: i64, amount: i64) -> Value {
        Value::from_lovelace(lovelace).add(self.token_policy.clone(), self.token.clone(), amount)
    }

    /// Lovelace plus the single NFT.
    pub fn wallet_with_nft(&self, lovelace: i64) -> Value {
        Value::from_lovelace(lovelace).add(self.nft_policy.clone(), self.nft.clone(), 1)
    }

    /// The same assets as `wallet(lovelace, amount)`, as an import list with
    /// policies out of order.
    pub fn asset_list(&self, lovelace: i64, amount: i64) -> AssetList {
        vec![
            (
                self.token_policy.clone(),
                vec![(self.token.clone(), BigInt::from(amount))],
            ),
            (
                PolicyId::LOVELACE,
                vec![(AssetName::LOVELACE, BigInt::from(lovelace))],
            ),
        ]
    }
}

impl Default for AssetFixture {
    fn default() -> Self {
        Self::new()
    }
}
