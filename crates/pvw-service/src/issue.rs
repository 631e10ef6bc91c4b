//! # Issuance
//!
//! The strong half of the protocol: admit the ticket, derive the seed,
//! embed the mark, commit, record, sign. The seed exists only on this
//! call's stack — what persists is the commitment and the hashes around it.

use serde::Deserialize;
use tracing::info;

use pvw_core::{digest_bytes, ClientId, Ticket, TimestampMs};
use pvw_crypto::{commit, derive_seed, pow};
use pvw_ledger::{IssueRecord, LedgerRecord, POLICY_SEED_BOUND};

use crate::error::ServiceError;
use crate::receipt::{IssueOutcome, Receipt};
use crate::service::{WatermarkService, ISSUE_ENDPOINT};

/// A request to watermark text and record the attestation.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRequest {
    pub client_id: ClientId,
    pub model_id: String,
    /// The text to watermark.
    pub text: String,
    /// Proof-of-work ticket for this request.
    pub ticket: Ticket,
}

impl WatermarkService {
    /// Issue a watermark attestation.
    ///
    /// Admission happens before any secret is touched: the ticket must name
    /// this client and the issue endpoint, its `body_hash` must be the
    /// SHA-256 of the submitted text, and its nonce must clear the declared
    /// difficulty. Only then is the seed derived, the mark embedded, and
    /// the signed issue record appended.
    pub fn issue(&self, request: IssueRequest) -> Result<IssueOutcome, ServiceError> {
        let ticket = &request.ticket;
        if ticket.client_id != request.client_id.0 {
            return Err(ServiceError::BadRequest(
                "ticket client_id does not match request".to_string(),
            ));
        }
        if ticket.endpoint != ISSUE_ENDPOINT {
            return Err(ServiceError::BadRequest(format!(
                "ticket endpoint must be {ISSUE_ENDPOINT}"
            )));
        }
        let body_hash = digest_bytes(request.text.as_bytes()).to_hex();
        if ticket.body_hash != body_hash {
            return Err(ServiceError::BadRequest(
                "ticket body_hash does not cover the submitted text".to_string(),
            ));
        }
        if !pow::validate_ticket(ticket) {
            return Err(ServiceError::InadmissiblePow);
        }

        let seed = derive_seed(ticket, &self.salt)?;
        let commitment = commit(&seed, &self.salt);
        let (watermarked, _tag) = self.embedder.embed(&request.text, &seed);
        drop(seed);

        let ticket_hash = ticket.hash()?;
        let timestamp = TimestampMs::now();
        let record = LedgerRecord::Issue(IssueRecord {
            ts: timestamp,
            client_id: request.client_id,
            model_id: request.model_id,
            commitment: commitment.clone(),
            ticket_hash: ticket_hash.clone(),
            output_hash: digest_bytes(watermarked.as_bytes()),
            policy_v: POLICY_SEED_BOUND,
        });
        let (entry, signature) = self.record_and_sign(record)?;
        info!(txid = %entry.txid, commitment = %commitment, "issued watermark attestation");

        Ok(IssueOutcome {
            watermarked,
            receipt: Receipt {
                commitment,
                txid: entry.txid,
                ticket_hash,
                timestamp,
            },
            signature,
        })
    }
}
