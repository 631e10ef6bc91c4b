//! Service error taxonomy.
//!
//! Admission failures (`InadmissiblePow`, `BadRequest`) and lookup misses
//! (`NotFound`) are caller errors and occur before any secret derivation or
//! ledger write. Everything else is an internal failure propagated from the
//! crates below; a ledger append failure fails the whole request rather
//! than returning an unrecorded result.

use thiserror::Error;

/// Errors surfaced by the issuance and verification operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The proof-of-work ticket does not meet its declared difficulty.
    #[error("inadmissible proof-of-work ticket")]
    InadmissiblePow,

    /// The request is structurally valid but violates an operation
    /// precondition (wrong endpoint, unbound body hash, mismatched client).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Evidence referenced a ledger entry that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Canonicalization of a ticket or record failed.
    #[error(transparent)]
    Canonicalization(#[from] pvw_core::CanonicalizationError),

    /// A core ticket or identifier operation failed.
    #[error(transparent)]
    Core(#[from] pvw_core::CoreError),

    /// A cryptographic operation failed.
    #[error(transparent)]
    Crypto(#[from] pvw_crypto::CryptoError),

    /// The ledger could not be read or written.
    #[error(transparent)]
    Ledger(#[from] pvw_ledger::LedgerError),
}
