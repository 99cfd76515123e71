//! Error types for the combined API.

use onchain_std_assets::ValueError;
use onchain_std_core::{DecodeError, DictError};
use thiserror::Error;

/// Any failure surfaced by the component crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Dictionary construction or a rejecting merge strategy.
    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),

    /// Malformed canonical bytes.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Data that decoded but is not a valid value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Result type for the combined API.
pub type Result<T> = std::result::Result<T, Error>;
