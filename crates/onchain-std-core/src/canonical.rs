//! Canonical CBOR encoding of data trees.
//!
//! The byte layout follows RFC 8949 and matches the ledger's own
//! serialiser exactly, because digests of these bytes identify data
//! elsewhere:
//! - Integers use the smallest head; values outside the 64-bit head range
//!   use bignum tags 2 and 3 over a big-endian magnitude
//! - Byte strings up to 64 bytes are definite, longer ones are an
//!   indefinite run of 64-byte chunks
//! - Non-empty lists are indefinite (`0x9f ... 0xff`), the empty list is `0x80`
//! - Maps are definite and keep their entry order
//! - Constructors 0-6 use tags 121-127, 7-127 use tags 1280-1400, anything
//!   larger uses tag 102 over `[index, fields]`. Decoding reads every tag
//!   from 1280 up as index `tag - 1280 + 7`
//!
//! **CRITICAL**: This encoding is FROZEN. Changing it changes every digest.

use num_bigint::BigInt;

use crate::data::{Data, ToData};

pub(crate) const MAJOR_UNSIGNED: u8 = 0;
pub(crate) const MAJOR_NEGATIVE: u8 = 1;
pub(crate) const MAJOR_BYTES: u8 = 2;
pub(crate) const MAJOR_LIST: u8 = 4;
pub(crate) const MAJOR_MAP: u8 = 5;
pub(crate) const MAJOR_TAG: u8 = 6;

pub(crate) const BREAK: u8 = 0xff;
pub(crate) const INDEFINITE: u8 = 31;

pub(crate) const TAG_POSITIVE_BIGNUM: u64 = 2;
pub(crate) const TAG_NEGATIVE_BIGNUM: u64 = 3;
pub(crate) const TAG_GENERAL_CONSTR: u64 = 102;

/// Longest byte string emitted as a single definite run.
pub const BYTES_CHUNK_SIZE: usize = 64;

/// Serialise a typed value through its data tree.
pub fn serialize<T: ToData + ?Sized>(value: &T) -> Vec<u8> {
    encode(&value.as_data())
}

/// Encode a data tree to canonical bytes.
pub fn encode(data: &Data) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_data(&mut buf, data);
    buf
}

/// Tag number used for constructor `index`, or `None` when the index needs
/// the general tag 102 form.
pub fn constr_tag(index: u64) -> Option<u64> {
    match index {
        0..=6 => Some(121 + index),
        7..=127 => Some(1280 + index - 7),
        _ => None,
    }
}

/// Constructor index carried by a compact constructor tag.
pub fn constr_index(tag: u64) -> Option<u64> {
    match tag {
        121..=127 => Some(tag - 121),
        1280.. => Some(tag - 1280 + 7),
        _ => None,
    }
}

fn encode_data(buf: &mut Vec<u8>, data: &Data) {
    match data {
        Data::Int(n) => encode_int(buf, n),
        Data::Bytes(b) => encode_bytes(buf, b),
        Data::List(items) => encode_list(buf, items),
        Data::Map(entries) => encode_map(buf, entries),
        Data::Constr { index, fields } => encode_constr(buf, *index, fields),
    }
}

/// Write a head: major type in the top three bits, argument in the smallest
/// form that holds it.
pub(crate) fn encode_head(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn encode_int(buf: &mut Vec<u8>, n: &BigInt) {
    if let Ok(small) = u64::try_from(n) {
        encode_head(buf, MAJOR_UNSIGNED, small);
        return;
    }

    // -1 is encoded as 0, -2 as 1, and so on
    let negated = BigInt::from(-1) - n;
    if let Ok(small) = u64::try_from(&negated) {
        encode_head(buf, MAJOR_NEGATIVE, small);
        return;
    }

    if n.sign() == num_bigint::Sign::Minus {
        encode_head(buf, MAJOR_TAG, TAG_NEGATIVE_BIGNUM);
        encode_bytes(buf, &negated.magnitude().to_bytes_be());
    } else {
        encode_head(buf, MAJOR_TAG, TAG_POSITIVE_BIGNUM);
        encode_bytes(buf, &n.magnitude().to_bytes_be());
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() <= BYTES_CHUNK_SIZE {
        encode_head(buf, MAJOR_BYTES, bytes.len() as u64);
        buf.extend_from_slice(bytes);
        return;
    }

    buf.push((MAJOR_BYTES << 5) | INDEFINITE);
    for chunk in bytes.chunks(BYTES_CHUNK_SIZE) {
        encode_head(buf, MAJOR_BYTES, chunk.len() as u64);
        buf.extend_from_slice(chunk);
    }
    buf.push(BREAK);
}

fn encode_list(buf: &mut Vec<u8>, items: &[Data]) {
    if items.is_empty() {
        encode_head(buf, MAJOR_LIST, 0);
        return;
    }

    buf.push((MAJOR_LIST << 5) | INDEFINITE);
    for item in items {
        encode_data(buf, item);
    }
    buf.push(BREAK);
}

fn encode_map(buf: &mut Vec<u8>, entries: &[(Data, Data)]) {
    encode_head(buf, MAJOR_MAP, entries.len() as u64);
    for (key, value) in entries {
        encode_data(buf, key);
        encode_data(buf, value);
    }
}

fn encode_constr(buf: &mut Vec<u8>, index: u64, fields: &[Data]) {
    match constr_tag(index) {
        Some(tag) => {
            encode_head(buf, MAJOR_TAG, tag);
            encode_list(buf, fields);
        }
        None => {
            encode_head(buf, MAJOR_TAG, TAG_GENERAL_CONSTR);
            encode_head(buf, MAJOR_LIST, 2);
            encode_head(buf, MAJOR_UNSIGNED, index);
            encode_list(buf, fields);
        }
    }
}
