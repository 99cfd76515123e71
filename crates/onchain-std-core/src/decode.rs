//! Decoding canonical bytes back into data trees.
//!
//! Decoding is the only fallible path of the codec and the only one that must
//! survive adversarial input: every malformed, truncated, or over-deep input
//! is rejected with a [`DecodeError`], never a panic.
//!
//! The decoder is more permissive than the encoder about *layout* (definite
//! or indefinite containers, non-minimal heads) but strict about *shape*:
//! text strings, floats, simple values, and every tag other than the
//! constructor and bignum tags are rejected. Tag 102 is reserved and refused.
//!
//! Decoding walks the input byte by byte and allocates the whole tree. It is
//! far more expensive than [`serialize`](crate::serialize); avoid it on hot
//! paths and compare serialised forms structurally where possible.

use num_bigint::{BigInt, BigUint};

use crate::canonical::{
    constr_index, BREAK, MAJOR_BYTES, MAJOR_LIST, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_TAG,
    MAJOR_UNSIGNED, TAG_GENERAL_CONSTR, TAG_NEGATIVE_BIGNUM, TAG_POSITIVE_BIGNUM,
};
use crate::data::{Data, FromData};
use crate::error::DecodeError;

/// Limits applied while decoding.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Maximum container nesting depth.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// Decode exactly one data tree spanning all of `bytes`.
///
/// Returns `None` on any malformed input. This is expensive; see the module
/// documentation.
pub fn deserialize(bytes: &[u8]) -> Option<Data> {
    deserialize_with(bytes, &DecoderConfig::default())
}

/// [`deserialize`] with explicit limits.
pub fn deserialize_with(bytes: &[u8], config: &DecoderConfig) -> Option<Data> {
    match try_deserialize_with(bytes, config) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::debug!("rejected data encoding: {}", e);
            None
        }
    }
}

/// Decode and convert into a typed value.
pub fn deserialize_as<T: FromData>(bytes: &[u8]) -> Option<T> {
    deserialize(bytes).as_ref().and_then(T::from_data)
}

/// Like [`deserialize`], reporting why the input was rejected.
pub fn try_deserialize(bytes: &[u8]) -> Result<Data, DecodeError> {
    try_deserialize_with(bytes, &DecoderConfig::default())
}

pub fn try_deserialize_with(bytes: &[u8], config: &DecoderConfig) -> Result<Data, DecodeError> {
    let mut decoder = Decoder {
        bytes,
        pos: 0,
        max_depth: config.max_depth,
    };
    let data = decoder.decode_data(0)?;

    if decoder.pos != bytes.len() {
        return Err(DecodeError::TrailingBytes {
            consumed: decoder.pos,
            total: bytes.len(),
        });
    }

    Ok(data)
}

/// A head's argument: a definite value, or the indefinite marker.
type Argument = Option<u64>;

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn peek_byte(&self) -> Result<u8, DecodeError> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEnd)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8], DecodeError> {
        let len = usize::try_from(len).map_err(|_| DecodeError::UnexpectedEnd)?;
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEnd);
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N as u64)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(slice);
        Ok(arr)
    }

    /// Consume a break byte if one is next.
    fn at_break(&mut self) -> Result<bool, DecodeError> {
        if self.peek_byte()? == BREAK {
            self.pos += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn read_head(&mut self) -> Result<(u8, Argument), DecodeError> {
        let initial = self.read_byte()?;
        let major = initial >> 5;
        let info = initial & 0x1f;

        let argument = match info {
            0..=23 => Some(u64::from(info)),
            24 => Some(u64::from(self.read_byte()?)),
            25 => Some(u64::from(u16::from_be_bytes(self.take_array()?))),
            26 => Some(u64::from(u32::from_be_bytes(self.take_array()?))),
            27 => Some(u64::from_be_bytes(self.take_array()?)),
            31 => None,
            _ => return Err(DecodeError::InvalidAdditionalInfo(info)),
        };

        Ok((major, argument))
    }

    fn decode_data(&mut self, depth: usize) -> Result<Data, DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthExceeded(self.max_depth));
        }

        let (major, argument) = self.read_head()?;
        match (major, argument) {
            (MAJOR_UNSIGNED, Some(n)) => Ok(Data::Int(BigInt::from(n))),
            (MAJOR_NEGATIVE, Some(n)) => Ok(Data::Int(BigInt::from(-1) - BigInt::from(n))),
            (MAJOR_BYTES, argument) => Ok(Data::Bytes(self.decode_bytes_body(argument)?)),
            (MAJOR_LIST, argument) => Ok(Data::List(self.decode_items(argument, depth)?)),
            (MAJOR_MAP, argument) => Ok(Data::Map(self.decode_entries(argument, depth)?)),
            (MAJOR_TAG, Some(tag)) => self.decode_tagged(tag, depth),
            (7, None) => Err(DecodeError::UnexpectedBreak),
            (MAJOR_UNSIGNED | MAJOR_NEGATIVE | MAJOR_TAG, None) => {
                Err(DecodeError::InvalidAdditionalInfo(31))
            }
            (major, _) => Err(DecodeError::UnsupportedMajorType(major)),
        }
    }

    fn decode_bytes_body(&mut self, argument: Argument) -> Result<Vec<u8>, DecodeError> {
        if let Some(len) = argument {
            return Ok(self.take(len)?.to_vec());
        }

        let mut bytes = Vec::new();
        while !self.at_break()? {
            match self.read_head()? {
                (MAJOR_BYTES, Some(len)) => bytes.extend_from_slice(self.take(len)?),
                _ => return Err(DecodeError::InvalidChunk),
            }
        }
        Ok(bytes)
    }

    fn decode_items(&mut self, argument: Argument, depth: usize) -> Result<Vec<Data>, DecodeError> {
        match argument {
            Some(len) => {
                // a claimed length can't outrun the input: every item is >= 1 byte
                let mut items = Vec::with_capacity(capacity_hint(len, self.remaining()));
                for _ in 0..len {
                    items.push(self.decode_data(depth + 1)?);
                }
                Ok(items)
            }
            None => {
                let mut items = Vec::new();
                while !self.at_break()? {
                    items.push(self.decode_data(depth + 1)?);
                }
                Ok(items)
            }
        }
    }

    fn decode_entries(
        &mut self,
        argument: Argument,
        depth: usize,
    ) -> Result<Vec<(Data, Data)>, DecodeError> {
        match argument {
            Some(len) => {
                let mut entries = Vec::with_capacity(capacity_hint(len, self.remaining() / 2));
                for _ in 0..len {
                    let key = self.decode_data(depth + 1)?;
                    let value = self.decode_data(depth + 1)?;
                    entries.push((key, value));
                }
                Ok(entries)
            }
            None => {
                let mut entries = Vec::new();
                while !self.at_break()? {
                    let key = self.decode_data(depth + 1)?;
                    let value = self.decode_data(depth + 1)?;
                    entries.push((key, value));
                }
                Ok(entries)
            }
        }
    }

    fn decode_tagged(&mut self, tag: u64, depth: usize) -> Result<Data, DecodeError> {
        if let Some(index) = constr_index(tag) {
            let fields = self.decode_fields(depth)?;
            return Ok(Data::Constr { index, fields });
        }

        match tag {
            TAG_POSITIVE_BIGNUM | TAG_NEGATIVE_BIGNUM => {
                let magnitude = match self.read_head()? {
                    (MAJOR_BYTES, argument) => self.decode_bytes_body(argument)?,
                    _ => return Err(DecodeError::InvalidBignum),
                };
                let n = BigInt::from(BigUint::from_bytes_be(&magnitude));
                if tag == TAG_POSITIVE_BIGNUM {
                    Ok(Data::Int(n))
                } else {
                    Ok(Data::Int(BigInt::from(-1) - n))
                }
            }
            TAG_GENERAL_CONSTR => Err(DecodeError::ReservedTag(tag)),
            _ => Err(DecodeError::UnsupportedTag(tag)),
        }
    }

    fn decode_fields(&mut self, depth: usize) -> Result<Vec<Data>, DecodeError> {
        match self.read_head()? {
            (MAJOR_LIST, argument) => self.decode_items(argument, depth + 1),
            _ => Err(DecodeError::InvalidFields),
        }
    }
}

fn capacity_hint(claimed: u64, remaining: usize) -> usize {
    usize::try_from(claimed).map_or(remaining, |n| n.min(remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{encode, serialize};

    fn hex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn test_roundtrip_examples() {
        let samples = vec![
            Data::int(0),
            Data::int(-1),
            Data::int(u64::MAX),
            Data::Int(BigInt::from(u64::MAX) * BigInt::from(1000)),
            Data::Int(-BigInt::from(u64::MAX) * BigInt::from(1000)),
            Data::bytes(b""),
            Data::bytes(vec![7u8; 200]),
            Data::list(vec![]),
            Data::list(vec![Data::int(1), Data::list(vec![Data::int(2)])]),
            Data::map(vec![]),
            Data::map(vec![(Data::bytes(b"a"), Data::int(1))]),
            Data::constr(0, vec![]),
            Data::constr(6, vec![Data::int(3)]),
            Data::constr(7, vec![Data::int(3)]),
            Data::constr(127, vec![Data::bytes(b"x")]),
        ];

        for data in samples {
            let bytes = encode(&data);
            assert_eq!(deserialize(&bytes), Some(data.clone()), "roundtrip of {}", data);
        }
    }

    #[test]
    fn test_accepts_definite_containers_and_wide_heads() {
        // [1, 2, 3] with a definite header
        assert_eq!(
            deserialize(&hex("83010203")),
            Some(Data::list(vec![Data::int(1), Data::int(2), Data::int(3)]))
        );
        // 5 encoded with a one-byte argument
        assert_eq!(deserialize(&hex("1805")), Some(Data::int(5)));
        // indefinite map {_ 1: 2}
        assert_eq!(
            deserialize(&hex("bf0102ff")),
            Some(Data::map(vec![(Data::int(1), Data::int(2))]))
        );
        // constructor with definite fields
        assert_eq!(
            deserialize(&hex("d87a8101")),
            Some(Data::constr(1, vec![Data::int(1)]))
        );
    }

    #[test]
    fn test_indefinite_bytes() {
        assert_eq!(
            deserialize(&hex("5f4201024103ff")),
            Some(Data::bytes([1u8, 2, 3]))
        );
        // a chunk that is not a definite byte string
        assert_eq!(try_deserialize(&hex("5f01ff")), Err(DecodeError::InvalidChunk));
    }

    #[test]
    fn test_rejects_reserved_tag_102() {
        let bytes = encode(&Data::constr(200, vec![]));
        assert_eq!(try_deserialize(&bytes), Err(DecodeError::ReservedTag(102)));
        assert_eq!(deserialize(&bytes), None);
    }

    #[test]
    fn test_constr_tags_past_1400_decode() {
        assert_eq!(
            try_deserialize(&hex("d9057980")),
            Ok(Data::constr(128, vec![]))
        );
        assert_eq!(
            try_deserialize(&hex("d905dc80")),
            Ok(Data::constr(227, vec![]))
        );
        // re-encoding picks the general form, which the decoder refuses
        assert_eq!(
            try_deserialize(&encode(&Data::constr(128, vec![]))),
            Err(DecodeError::ReservedTag(102))
        );
    }

    #[test]
    fn test_rejects_other_tags_and_types() {
        // tag 1279 sits just below the second constructor range
        assert_eq!(
            try_deserialize(&hex("d904ff80")),
            Err(DecodeError::UnsupportedTag(1279))
        );
        // text string
        assert_eq!(
            try_deserialize(&hex("6161")),
            Err(DecodeError::UnsupportedMajorType(3))
        );
        // true
        assert_eq!(
            try_deserialize(&hex("f5")),
            Err(DecodeError::UnsupportedMajorType(7))
        );
        assert_eq!(try_deserialize(&hex("ff")), Err(DecodeError::UnexpectedBreak));
        assert_eq!(
            try_deserialize(&hex("1c")),
            Err(DecodeError::InvalidAdditionalInfo(28))
        );
        // constructor fields must be a list
        assert_eq!(try_deserialize(&hex("d87901")), Err(DecodeError::InvalidFields));
        // bignum payload must be bytes
        assert_eq!(try_deserialize(&hex("c201")), Err(DecodeError::InvalidBignum));
    }

    #[test]
    fn test_rejects_truncated_and_trailing() {
        assert_eq!(try_deserialize(&[]), Err(DecodeError::UnexpectedEnd));
        assert_eq!(try_deserialize(&hex("19ff")), Err(DecodeError::UnexpectedEnd));
        assert_eq!(try_deserialize(&hex("43ff")), Err(DecodeError::UnexpectedEnd));
        assert_eq!(try_deserialize(&hex("9f01")), Err(DecodeError::UnexpectedEnd));
        assert_eq!(
            try_deserialize(&hex("0101")),
            Err(DecodeError::TrailingBytes {
                consumed: 1,
                total: 2
            })
        );
    }

    #[test]
    fn test_huge_claimed_length_does_not_allocate() {
        // list claiming u64::MAX items with nothing after it
        assert_eq!(
            try_deserialize(&hex("9bffffffffffffffff")),
            Err(DecodeError::UnexpectedEnd)
        );
        // byte string claiming u64::MAX bytes
        assert_eq!(
            try_deserialize(&hex("5bffffffffffffffff")),
            Err(DecodeError::UnexpectedEnd)
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut bytes = vec![0x81; 40];
        bytes.push(0x00);

        let shallow = DecoderConfig { max_depth: 8 };
        assert_eq!(
            try_deserialize_with(&bytes, &shallow),
            Err(DecodeError::DepthExceeded(8))
        );
        assert!(try_deserialize(&bytes).is_ok());

        // deep enough to overflow a naive decoder's stack
        let hostile = vec![0x81; 1_000_000];
        assert_eq!(deserialize(&hostile), None);
    }

    #[test]
    fn test_bignum_with_small_value_decodes() {
        // tag 2 over h'05' is just 5
        assert_eq!(deserialize(&hex("c24105")), Some(Data::int(5)));
        // tag 3 over h'' is -1
        assert_eq!(deserialize(&hex("c340")), Some(Data::int(-1)));
    }

    #[test]
    fn test_deserialize_as() {
        let bytes = serialize(&Some(42i64));
        assert_eq!(deserialize_as::<Option<i64>>(&bytes), Some(Some(42)));
        assert_eq!(deserialize_as::<Vec<i64>>(&bytes), None);
    }

    mod properties {
        use super::*;
        use crate::canonical::constr_tag;
        use proptest::prelude::*;

        fn compact_constrs_only(data: &Data) -> bool {
            match data {
                Data::Int(_) | Data::Bytes(_) => true,
                Data::List(items) => items.iter().all(compact_constrs_only),
                Data::Map(entries) => entries
                    .iter()
                    .all(|(k, v)| compact_constrs_only(k) && compact_constrs_only(v)),
                Data::Constr { index, fields } => {
                    constr_tag(*index).is_some() && fields.iter().all(compact_constrs_only)
                }
            }
        }

        proptest! {
            #[test]
            fn test_decoder_is_total(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
                let _ = try_deserialize(&bytes);
            }

            #[test]
            fn test_accepted_input_is_stable(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
                if let Some(data) = deserialize(&bytes) {
                    prop_assume!(compact_constrs_only(&data));
                    prop_assert_eq!(deserialize(&serialize(&data)), Some(data));
                }
            }
        }
    }
}
