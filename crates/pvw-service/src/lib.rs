//! # pvw-service
//!
//! The operations layer: admit a proof-of-work ticket, issue a watermark
//! attestation, verify content against evidence, and leave a signed ledger
//! line behind for every completed operation.
//!
//! No transport lives here. [`WatermarkService`] is a library API; the CLI
//! drives it directly and an HTTP layer would wrap the same calls.

pub mod config;
pub mod error;
pub mod issue;
pub mod receipt;
pub mod service;
pub mod verify;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use issue::IssueRequest;
pub use receipt::{IssueOutcome, Receipt, Transcript, VerifyOutcome};
pub use service::{WatermarkService, ISSUE_ENDPOINT, VERIFY_ENDPOINT};
pub use verify::{VerifyEvidence, VerifyRequest};
