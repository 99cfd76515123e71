//! Typed decoding with the failure reason kept.
//!
//! [`deserialize_as`](onchain_std_core::deserialize_as) answers `None` for
//! both unreadable bytes and readable bytes of the wrong shape. The helpers
//! here tell the two apart.

use onchain_std_assets::Value;
use onchain_std_core::{try_deserialize_with, DecoderConfig};

use crate::error::Result;

/// Decode canonical bytes into a [`Value`] under the default limits.
pub fn decode_value(bytes: &[u8]) -> Result<Value> {
    decode_value_with(bytes, &DecoderConfig::default())
}

/// Decode canonical bytes into a [`Value`].
pub fn decode_value_with(bytes: &[u8], config: &DecoderConfig) -> Result<Value> {
    let data = try_deserialize_with(bytes, config)?;
    match Value::try_from(&data) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::debug!("decoded data is not a value: {}", e);
            Err(e.into())
        }
    }
}
