//! # Verification
//!
//! Evidence is resolved exactly once, at the top of the operation, into a
//! commitment plus the strongest detection the evidence supports:
//!
//! - **Ticket** — the original issuance ticket re-clears the PoW gate, the
//!   seed is re-derived, and detection is seed-bound (`policy_v` 2).
//! - **Commitment** — taken at face value; detection is presence-only
//!   (`policy_v` 1).
//! - **Txid** — the commitment is recovered from the referenced issue
//!   record; detection is presence-only (`policy_v` 1).
//!
//! Every run, positive or negative, appends a signed verify record; the
//! transcript returned to the caller is exactly what the ledger holds.

use serde::Deserialize;
use tracing::info;

use pvw_core::{digest_bytes, ClientId, Commitment, Ticket, TicketHash, TimestampMs, TxId};
use pvw_crypto::{commit, derive_seed, pow};
use pvw_ledger::{
    format_metric, LedgerRecord, VerifyRecord, POLICY_PRESENCE_ONLY, POLICY_SEED_BOUND,
};
use pvw_watermark::DetectionResult;

use crate::error::ServiceError;
use crate::receipt::{Transcript, VerifyOutcome};
use crate::service::{WatermarkService, VERIFY_ENDPOINT};

/// What a verifier can present to name the attestation under test.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyEvidence {
    /// The original issuance ticket; enables seed-bound detection.
    Ticket(Ticket),
    /// A commitment taken from a receipt.
    Commitment(Commitment),
    /// A ledger txid; the commitment is looked up.
    Txid(TxId),
}

/// A request to verify content against an attestation.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub client_id: ClientId,
    /// The content under test.
    pub content: String,
    pub evidence: VerifyEvidence,
    /// Optional PoW ticket gating this verification request itself.
    #[serde(default)]
    pub pow: Option<Ticket>,
}

struct Resolved {
    commitment: Commitment,
    detection: DetectionResult,
    ticket_hash: Option<TicketHash>,
    policy_v: u32,
}

impl WatermarkService {
    /// Verify content against evidence and append the signed transcript.
    pub fn verify(&self, request: VerifyRequest) -> Result<VerifyOutcome, ServiceError> {
        if let Some(ticket) = &request.pow {
            self.admit_verify_pow(ticket, &request)?;
        }

        let resolved = self.resolve(&request.evidence, &request.content)?;
        let decision = resolved.detection.decision();

        let record = VerifyRecord {
            ts: TimestampMs::now(),
            client_id: request.client_id,
            commitment: resolved.commitment,
            content_hash: digest_bytes(request.content.as_bytes()),
            statistic: format_metric(resolved.detection.statistic),
            pvalue: format_metric(resolved.detection.pvalue),
            decision,
            ticket_hash: resolved.ticket_hash,
            policy_v: resolved.policy_v,
        };
        let (entry, signature) = self.record_and_sign(LedgerRecord::Verify(record.clone()))?;
        info!(
            txid = %entry.txid,
            decision,
            policy_v = resolved.policy_v,
            "verification recorded"
        );

        Ok(VerifyOutcome {
            decision,
            detection: resolved.detection,
            transcript: Transcript {
                txid: entry.txid,
                signature,
                record,
            },
        })
    }

    /// Resolve evidence into a commitment and the detection it supports.
    fn resolve(&self, evidence: &VerifyEvidence, content: &str) -> Result<Resolved, ServiceError> {
        match evidence {
            VerifyEvidence::Ticket(ticket) => {
                if !pow::validate_ticket(ticket) {
                    return Err(ServiceError::InadmissiblePow);
                }
                let seed = derive_seed(ticket, &self.salt)?;
                let commitment = commit(&seed, &self.salt);
                let detection = self.detector.detect_with_seed(content, &seed);
                Ok(Resolved {
                    commitment,
                    detection,
                    ticket_hash: Some(ticket.hash()?),
                    policy_v: POLICY_SEED_BOUND,
                })
            }
            VerifyEvidence::Commitment(commitment) => Ok(Resolved {
                commitment: commitment.clone(),
                detection: self.detector.detect_with_commitment(content, commitment),
                ticket_hash: None,
                policy_v: POLICY_PRESENCE_ONLY,
            }),
            VerifyEvidence::Txid(txid) => {
                let entry = self
                    .ledger
                    .find_issue_by_txid(txid)?
                    .ok_or_else(|| ServiceError::NotFound(format!("unknown txid {txid}")))?;
                let commitment = entry.record.commitment().clone();
                let detection = self.detector.detect_with_commitment(content, &commitment);
                Ok(Resolved {
                    commitment,
                    detection,
                    ticket_hash: None,
                    policy_v: POLICY_PRESENCE_ONLY,
                })
            }
        }
    }

    /// Admit an auxiliary PoW ticket supplied with a verify request.
    fn admit_verify_pow(&self, ticket: &Ticket, request: &VerifyRequest) -> Result<(), ServiceError> {
        if ticket.client_id != request.client_id.0 {
            return Err(ServiceError::BadRequest(
                "pow ticket client_id does not match request".to_string(),
            ));
        }
        if ticket.endpoint != VERIFY_ENDPOINT {
            return Err(ServiceError::BadRequest(format!(
                "pow ticket endpoint must be {VERIFY_ENDPOINT}"
            )));
        }
        let body_hash = digest_bytes(request.content.as_bytes()).to_hex();
        if ticket.body_hash != body_hash {
            return Err(ServiceError::BadRequest(
                "pow ticket body_hash does not cover the submitted content".to_string(),
            ));
        }
        if !pow::validate_ticket(ticket) {
            return Err(ServiceError::InadmissiblePow);
        }
        Ok(())
    }
}
