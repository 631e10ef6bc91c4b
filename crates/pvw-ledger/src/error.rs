//! Ledger error types.

use thiserror::Error;

/// Errors surfaced by ledger encoding and storage.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record could not be canonicalized for txid computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] pvw_core::CanonicalizationError),

    /// A record or entry could not be encoded to its storage line.
    #[error("record encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying ledger file could not be read or written.
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
}
