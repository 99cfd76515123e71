//! Golden vectors for the canonical encoding.
//!
//! Each vector pins a data tree to its exact bytes and diagnostic string.
//! Other implementations of the codec can be checked against the same list.

use serde::Serialize;

use onchain_std_core::{deserialize, diagnostic, serialize, BigInt, Data};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The tree to encode.
    #[serde(skip)]
    pub data: Data,
    /// Expected canonical bytes (hex).
    pub expected_hex: String,
    /// Expected diagnostic notation.
    pub expected_diagnostic: String,
}

fn vector(
    name: &'static str,
    data: Data,
    expected_hex: impl Into<String>,
    expected_diagnostic: impl Into<String>,
) -> GoldenVector {
    GoldenVector {
        name,
        data,
        expected_hex: expected_hex.into(),
        expected_diagnostic: expected_diagnostic.into(),
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let two_to_64: BigInt = BigInt::from(u64::MAX) + BigInt::from(1);

    vec![
        vector("zero", Data::int(0), "00", "0"),
        vector("small int", Data::int(23), "17", "23"),
        vector("one byte int", Data::int(42), "182a", "42"),
        vector("minus one", Data::int(-1), "20", "-1"),
        vector(
            "largest head",
            Data::int(u64::MAX),
            "1bffffffffffffffff",
            "18446744073709551615",
        ),
        vector(
            "smallest negative head",
            Data::Int(-two_to_64.clone()),
            "3bffffffffffffffff",
            "-18446744073709551616",
        ),
        vector(
            "positive bignum",
            Data::Int(two_to_64.clone()),
            "c249010000000000000000",
            "18446744073709551616",
        ),
        vector(
            "negative bignum",
            Data::Int(-two_to_64 - BigInt::from(1)),
            "c349010000000000000000",
            "-18446744073709551617",
        ),
        vector("empty bytes", Data::bytes(b""), "40", "h''"),
        vector(
            "bytes",
            Data::bytes([0xdeu8, 0xad, 0xbe, 0xef]),
            "44deadbeef",
            "h'DEADBEEF'",
        ),
        vector(
            "64 bytes",
            Data::bytes([0u8; 64]),
            format!("5840{}", "00".repeat(64)),
            format!("h'{}'", "00".repeat(64)),
        ),
        vector(
            "65 bytes",
            Data::bytes([0u8; 65]),
            format!("5f5840{}4100ff", "00".repeat(64)),
            format!("h'{}'", "00".repeat(65)),
        ),
        vector("empty list", Data::list(vec![]), "80", "[]"),
        vector(
            "list",
            Data::list(vec![Data::int(1), Data::int(2), Data::int(3)]),
            "9f010203ff",
            "[_ 1, 2, 3]",
        ),
        vector("empty map", Data::map(vec![]), "a0", "{}"),
        vector(
            "map",
            Data::map(vec![
                (Data::int(1), Data::bytes([0xaau8])),
                (Data::int(2), Data::bytes([0xbbu8])),
            ]),
            "a20141aa0241bb",
            "{_ 1: h'AA', 2: h'BB'}",
        ),
        vector(
            "constructor 0",
            Data::constr(0, vec![Data::int(42)]),
            "d8799f182aff",
            "121([_ 42])",
        ),
        vector("constructor 1", Data::constr(1, vec![]), "d87a80", "122([])"),
        vector(
            "constructor 6",
            Data::constr(6, vec![]),
            "d87f80",
            "127([])",
        ),
        vector(
            "constructor 7",
            Data::constr(7, vec![]),
            "d9050080",
            "1280([])",
        ),
        vector(
            "constructor 127",
            Data::constr(127, vec![Data::int(1)]),
            "d905789f01ff",
            "1400([_ 1])",
        ),
    ]
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, actual_hex)` for each vector. A vector matches
/// when its bytes, its diagnostic, and its decoded tree all agree.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let bytes = serialize(&v.data);
            let hex = hex::encode(&bytes);

            let matches = hex == v.expected_hex
                && diagnostic(&v.data) == v.expected_diagnostic
                && deserialize(&bytes).as_ref() == Some(&v.data);

            (v.name.to_string(), matches, hex)
        })
        .collect()
}

/// Render the vectors as JSON for consumption elsewhere.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_verify() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "vector '{}' failed, got {}", name, hex);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        for (i, a) in vectors.iter().enumerate() {
            for b in &vectors[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_vectors_json() {
        let json = vectors_json().unwrap();
        assert!(json.contains("\"expected_hex\": \"d87a80\""));
        assert!(!json.contains("\"data\""));
    }
}
