//! Error types for multi-asset values.

use thiserror::Error;

use crate::types::PolicyId;

/// Reasons an externally supplied asset list is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("duplicate policy in asset list: {0}")]
    DuplicatePolicy(PolicyId),

    #[error("empty asset list under policy {0}")]
    EmptyAssetList(PolicyId),

    #[error("asset names under policy {0} are not strictly ascending")]
    UnsortedAssetNames(PolicyId),

    #[error("zero quantity under policy {0}")]
    ZeroQuantity(PolicyId),

    #[error("malformed value: {0}")]
    Malformed(String),
}
