//! # pvw-ledger
//!
//! The signed append-only attestation ledger: record types with
//! content-derived identity, and the newline-delimited JSON store they
//! land in.
//!
//! This crate knows nothing about keys. Signatures arrive as opaque hex
//! strings produced elsewhere and are stored and returned verbatim; txids
//! are recomputable by anyone from record fields alone.

pub mod error;
pub mod record;
pub mod store;

pub use error::LedgerError;
pub use record::{
    format_metric, IssueRecord, LedgerEntry, LedgerRecord, VerifyRecord, POLICY_PRESENCE_ONLY,
    POLICY_SEED_BOUND,
};
pub use store::{Ledger, LEDGER_FILE};
