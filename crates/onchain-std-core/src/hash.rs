//! Content identifiers for data trees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::encode;
use crate::data::Data;

/// Blake3 digest of a data tree's canonical encoding.
///
/// Two trees share a `DataHash` exactly when their canonical bytes are equal,
/// which for this codec means when the trees are structurally equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataHash(pub [u8; 32]);

impl DataHash {
    /// Hash the canonical encoding of `data`.
    pub fn of(data: &Data) -> Self {
        Self::hash(&encode(data))
    }

    /// Hash raw bytes, assumed to already be a canonical encoding.
    pub fn hash(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for DataHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
