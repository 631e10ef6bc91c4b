//! # SHA-256 Digests — Content-Derived Identifiers
//!
//! Defines `Sha256Digest` and the two digest computation paths used by the
//! PVW Stack:
//!
//! - [`digest_canonical()`] — hashes `CanonicalBytes`. This is the path for
//!   every structured value: ticket hashes, txids, seed input key material.
//!   The signature accepts only `&CanonicalBytes`, so a digest over
//!   non-canonical serialization of a ticket or record is a compile error.
//! - [`digest_bytes()`] — hashes raw bytes. This is the path for opaque
//!   content: request bodies, watermarked output, verified content. Content
//!   is not JSON, so it does not pass through the canonicalization pipeline.
//!
//! ## Serde
//!
//! Digests serialize as 64-character lowercase hex strings for JSON
//! interoperability with ledger entries and receipts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CoreError;

/// A SHA-256 digest (32 bytes).
///
/// Rendered and serialized as a 64-character lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    /// Create a digest from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a digest from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(CoreError::InvalidIdentifier(format!(
                "digest hex must be 64 chars, got {}",
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex).map_err(CoreError::InvalidIdentifier)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Count of leading zero bits in the 256-bit digest value.
    ///
    /// Used by the proof-of-work gate: a digest with `n` leading zero bits
    /// satisfies any difficulty `d <= n`.
    pub fn leading_zero_bits(&self) -> u32 {
        let mut count = 0;
        for byte in self.0 {
            if byte == 0 {
                count += 8;
            } else {
                count += byte.leading_zeros();
                break;
            }
        }
        count
    }
}

impl Serialize for Sha256Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sha256Digest({}...)", bytes_to_hex(&self.0[..4]))
    }
}

impl std::fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute a SHA-256 digest from canonical bytes.
///
/// The structured-value digest path. Accepts only `&CanonicalBytes`, not raw
/// `&[u8]`, so every ticket hash and txid in the system is guaranteed to have
/// been computed over the JCS canonical form.
pub fn digest_canonical(data: &CanonicalBytes) -> Sha256Digest {
    sha256(data.as_bytes())
}

/// Compute a SHA-256 digest over raw bytes.
///
/// The opaque-content digest path: body hashes, output hashes, and content
/// hashes are digests of the literal content bytes.
pub fn digest_bytes(data: &[u8]) -> Sha256Digest {
    sha256(data)
}

fn sha256(data: &[u8]) -> Sha256Digest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Sha256Digest(bytes)
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

/// Render bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a lowercase/uppercase hex string into bytes.
///
/// Decodes byte-wise, so non-ASCII input (which can never be valid hex) is
/// reported as an error rather than tripping a char-boundary slice.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    raw.chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (hex_nibble(pair[0]), hex_nibble(pair[1])) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(format!("invalid hex at position {}", i * 2)),
        })
        .collect()
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
