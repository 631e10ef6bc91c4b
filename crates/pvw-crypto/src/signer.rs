//! # Record Signer — HMAC-SHA256
//!
//! Signs canonicalized ledger records with the server signing key. The
//! signature proves, to a holder of the key, that a record has not been
//! altered since the server wrote it.
//!
//! ## Security Invariants
//!
//! - Signing input MUST be `&CanonicalBytes` — you cannot sign raw bytes.
//!   The signature is computed over the record *before* the signature (and
//!   txid) are attached; verifiers recompute over exactly the same field
//!   set.
//! - Verification is constant-time (`Mac::verify_slice`).
//! - The signing key is distinct from the derivation salt; see
//!   [`crate::secrets::SecretStore::load_pair()`].

use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use pvw_core::{bytes_to_hex, hex_to_bytes, CanonicalBytes};

use crate::error::CryptoError;
use crate::secrets::ServerKey;

type HmacSha256 = Hmac<Sha256>;

/// An HMAC-SHA256 record signature (32 bytes).
///
/// Serializes as a 64-character lowercase hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RecordSignature([u8; 32]);

impl RecordSignature {
    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a signature from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_bytes(hex.trim()).map_err(CryptoError::HexDecode)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::VerificationFailed(format!(
                "signature must be 32 bytes (64 hex chars), got {}",
                b.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Access the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Serialize for RecordSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for RecordSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecordSignature({}...)", bytes_to_hex(&self.0[..4]))
    }
}

impl std::fmt::Display for RecordSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// HMAC-SHA256 signer over canonical record bytes.
///
/// Holds the server signing key; construct once at startup and share by
/// reference. Does not implement `Debug`-with-key or `Serialize`.
pub struct RecordSigner {
    key: ServerKey,
}

impl RecordSigner {
    /// Create a signer from the server signing key.
    pub fn new(key: ServerKey) -> Self {
        Self { key }
    }

    /// Sign canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> Result<RecordSignature, CryptoError> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| CryptoError::VerificationFailed(format!("invalid HMAC key: {e}")))?;
        mac.update(data.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&mac.finalize().into_bytes());
        Ok(RecordSignature(bytes))
    }

    /// Verify a signature over canonical bytes in constant time.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::VerificationFailed` on mismatch — the caller
    /// decides whether that invalidates a record's trustworthiness or the
    /// whole request.
    pub fn verify(
        &self,
        data: &CanonicalBytes,
        signature: &RecordSignature,
    ) -> Result<(), CryptoError> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| CryptoError::VerificationFailed(format!("invalid HMAC key: {e}")))?;
        mac.update(data.as_bytes());
        mac.verify_slice(&signature.0)
            .map_err(|_| CryptoError::VerificationFailed("HMAC mismatch".to_string()))
    }
}

impl std::fmt::Debug for RecordSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecordSigner(<key>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::ServerKey;

    fn signer() -> RecordSigner {
        RecordSigner::new(ServerKey::from_bytes([0x5a; 32]))
    }

    fn canonical(value: serde_json::Value) -> CanonicalBytes {
        CanonicalBytes::new(&value).unwrap()
    }

    #[test]
    fn sign_is_reproducible() {
        let data = canonical(serde_json::json!({"type": "issue", "ts": 1}));
        let s1 = signer().sign(&data).unwrap();
        let s2 = signer().sign(&data).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn verify_accepts_valid_signature() {
        let data = canonical(serde_json::json!({"commitment": "ab", "ts": 2}));
        let sig = signer().sign(&data).unwrap();
        assert!(signer().verify(&data, &sig).is_ok());
    }

    #[test]
    fn mutated_record_fails_verification() {
        let original = canonical(serde_json::json!({"decision": true, "ts": 3}));
        let mutated = canonical(serde_json::json!({"decision": false, "ts": 3}));
        let sig = signer().sign(&original).unwrap();
        assert!(signer().verify(&mutated, &sig).is_err());
    }

    #[test]
    fn added_field_fails_verification() {
        let unsigned = canonical(serde_json::json!({"ts": 4}));
        let with_extra = canonical(serde_json::json!({"ts": 4, "sig": "self"}));
        let sig = signer().sign(&unsigned).unwrap();
        assert!(signer().verify(&with_extra, &sig).is_err());
    }

    #[test]
    fn different_keys_different_signatures() {
        let data = canonical(serde_json::json!({"ts": 5}));
        let a = RecordSigner::new(ServerKey::from_bytes([0x01; 32]));
        let b = RecordSigner::new(ServerKey::from_bytes([0x02; 32]));
        assert_ne!(a.sign(&data).unwrap(), b.sign(&data).unwrap());
        assert!(b.verify(&data, &a.sign(&data).unwrap()).is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let data = canonical(serde_json::json!({"ts": 6}));
        let sig = signer().sign(&data).unwrap();
        let hex = sig.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(RecordSignature::from_hex(&hex).unwrap(), sig);
    }

    #[test]
    fn signature_serde_roundtrip() {
        let data = canonical(serde_json::json!({"ts": 7}));
        let sig = signer().sign(&data).unwrap();
        let json = serde_json::to_string(&sig).unwrap();
        let back: RecordSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn debug_redacts_key() {
        assert_eq!(format!("{:?}", signer()), "RecordSigner(<key>)");
    }
}
