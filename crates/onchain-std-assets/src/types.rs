//! Identifier newtypes for assets.
//!
//! Both are free-form byte strings ordered lexicographically. The empty byte
//! string is reserved: the empty policy with the empty name is lovelace, the
//! native currency, and it sorts before every other identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use onchain_std_core::{Data, FromData, ToData};

macro_rules! asset_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// The reserved empty identifier used by lovelace.
            pub const LOVELACE: Self = Self(Vec::new());

            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            pub fn is_lovelace(&self) -> bool {
                self.0.is_empty()
            }

            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                Ok(Self(hex::decode(s)?))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }

        impl ToData for $name {
            fn to_data(&self) -> Data {
                Data::Bytes(self.0.clone())
            }
        }

        impl FromData for $name {
            fn from_data(data: &Data) -> Option<Self> {
                data.as_bytes().map(Self::from)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

asset_identifier!(
    /// Identifier grouping related tokens: the 28-byte hash of the minting
    /// script on the ledger, or empty for lovelace.
    PolicyId
);

asset_identifier!(
    /// Name of a token under its policy, 0 to 32 bytes.
    AssetName
);

impl PolicyId {
    /// Length of a script-hash policy identifier.
    pub const HASH_LENGTH: usize = 28;
}

impl AssetName {
    /// Longest name the ledger accepts.
    pub const MAX_LENGTH: usize = 32;
}
