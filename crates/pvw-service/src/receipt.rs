//! # Receipts and Transcripts
//!
//! What callers take away from a completed operation. Neither carries the
//! seed or any other secret — a receipt proves an issuance happened, a
//! transcript proves what a verification concluded, and both point at the
//! ledger line that recorded it.

use serde::Serialize;

use pvw_core::{Commitment, TicketHash, TimestampMs, TxId};
use pvw_crypto::RecordSignature;
use pvw_ledger::VerifyRecord;
use pvw_watermark::DetectionResult;

/// Proof of issuance handed back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub commitment: Commitment,
    pub txid: TxId,
    pub ticket_hash: TicketHash,
    pub timestamp: TimestampMs,
}

/// Result of [`crate::WatermarkService::issue`].
#[derive(Debug, Clone, Serialize)]
pub struct IssueOutcome {
    /// The watermarked form of the submitted text.
    pub watermarked: String,
    pub receipt: Receipt,
    /// Signature over the canonical issue record.
    pub signature: RecordSignature,
}

/// The signed account of a verification run.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub txid: TxId,
    /// Signature over the canonical verify record.
    pub signature: RecordSignature,
    pub record: VerifyRecord,
}

/// Result of [`crate::WatermarkService::verify`].
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    /// Whether the watermark was judged present.
    pub decision: bool,
    /// The raw detector output behind the decision.
    pub detection: DetectionResult,
    pub transcript: Transcript,
}
