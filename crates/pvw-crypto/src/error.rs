//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `pvw-crypto`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from cryptographic operations in the PVW Stack.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Canonicalization of signing/derivation input failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] pvw_core::CanonicalizationError),

    /// Seed derivation failed. There is no fallback to a weaker scheme:
    /// a process that cannot run HKDF must refuse to serve.
    #[error("seed derivation failed: {0}")]
    Derivation(String),

    /// HMAC signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Secret material could not be loaded or generated.
    #[error("secret store error: {0}")]
    SecretStore(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// I/O error (secret file operations).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_display() {
        let err = CryptoError::Derivation("okm length".to_string());
        assert!(format!("{err}").contains("okm length"));
    }

    #[test]
    fn secret_store_display() {
        let err = CryptoError::SecretStore("salt and key identical".to_string());
        assert!(format!("{err}").contains("identical"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CryptoError::from(io_err);
        assert!(format!("{err}").contains("denied"));
    }
}
