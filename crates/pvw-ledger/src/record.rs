//! # Ledger Records
//!
//! The two record kinds the ledger stores — issuance and verification — as
//! a tagged union, plus the signed envelope that actually lands on disk.
//!
//! ## Identity
//!
//! A record's `txid` is the SHA-256 of its canonical JSON form, computed
//! over the record *only*: neither `txid` nor `sig` participates. Any
//! reader can therefore recompute and check a line's txid from its record
//! fields alone, and the signature can rotate schemes without changing
//! record identity.
//!
//! ## Detection metrics
//!
//! `statistic` and `pvalue` are stored as decimal strings, formatted once
//! by the writer ([`format_metric`]). Canonical JSON has exactly one
//! serialization for a string; floats would reintroduce the representation
//! ambiguity the canonical layer exists to remove.

use serde::{Deserialize, Serialize};

use pvw_core::{
    digest_canonical, CanonicalBytes, CanonicalizationError, ClientId, Commitment, Sha256Digest,
    TicketHash, TimestampMs, TxId,
};

use crate::error::LedgerError;

/// Policy version for seed-bound verification (evidence allowed seed
/// re-derivation).
pub const POLICY_SEED_BOUND: u32 = 2;

/// Policy version for presence-only verification (commitment evidence
/// without a ticket).
pub const POLICY_PRESENCE_ONLY: u32 = 1;

/// Format a detection metric for storage.
///
/// `{:?}` is Rust's shortest round-trip float form and keeps the trailing
/// `.0` on whole values, so `1.0` stores as `"1.0"`, never `"1"`.
pub fn format_metric(value: f64) -> String {
    format!("{value:?}")
}

/// A watermark issuance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub ts: TimestampMs,
    pub client_id: ClientId,
    pub model_id: String,
    pub commitment: Commitment,
    pub ticket_hash: TicketHash,
    /// SHA-256 of the watermarked output handed back to the client.
    pub output_hash: Sha256Digest,
    pub policy_v: u32,
}

/// A verification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyRecord {
    pub ts: TimestampMs,
    pub client_id: ClientId,
    pub commitment: Commitment,
    /// SHA-256 of the content that was checked.
    pub content_hash: Sha256Digest,
    /// Detection statistic, formatted by [`format_metric`].
    pub statistic: String,
    /// Detection p-value, formatted by [`format_metric`].
    pub pvalue: String,
    pub decision: bool,
    /// Hash of the resubmitted ticket when the strong path was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_hash: Option<TicketHash>,
    pub policy_v: u32,
}

/// Any record the ledger accepts, discriminated by a `"type"` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerRecord {
    Issue(IssueRecord),
    Verify(VerifyRecord),
}

impl LedgerRecord {
    /// Canonical bytes of the record, `"type"` tag included.
    pub fn canonical(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }

    /// Content-derived identifier: SHA-256 of the canonical record.
    pub fn txid(&self) -> Result<TxId, CanonicalizationError> {
        Ok(TxId::from_digest(&digest_canonical(&self.canonical()?)))
    }

    /// The record's commitment, whichever kind it is.
    pub fn commitment(&self) -> &Commitment {
        match self {
            LedgerRecord::Issue(r) => &r.commitment,
            LedgerRecord::Verify(r) => &r.commitment,
        }
    }
}

/// A sealed ledger line: txid, signature, and the record's own fields
/// flattened beside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub txid: TxId,
    /// Hex HMAC-SHA256 over the record's canonical bytes. Stored opaquely;
    /// the signing key never enters this crate.
    pub sig: String,
    #[serde(flatten)]
    pub record: LedgerRecord,
}

impl LedgerEntry {
    /// Seal a record with its signature, computing the txid.
    pub fn seal(record: LedgerRecord, sig: String) -> Result<Self, LedgerError> {
        let txid = record.txid()?;
        Ok(Self { txid, sig, record })
    }

    /// Recompute the record's txid and compare to the stored one.
    pub fn txid_consistent(&self) -> Result<bool, LedgerError> {
        Ok(self.record.txid()? == self.txid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_record() -> IssueRecord {
        IssueRecord {
            ts: TimestampMs::from_millis(1_700_000_000_000),
            client_id: ClientId("alice".to_string()),
            model_id: "demo-model".to_string(),
            commitment: Commitment::parse(&"ab".repeat(32)).unwrap(),
            ticket_hash: TicketHash::parse(&"cd".repeat(32)).unwrap(),
            output_hash: pvw_core::digest_bytes(b"watermarked output"),
            policy_v: POLICY_SEED_BOUND,
        }
    }

    fn verify_record(ticket_hash: Option<TicketHash>) -> VerifyRecord {
        let policy_v = if ticket_hash.is_some() {
            POLICY_SEED_BOUND
        } else {
            POLICY_PRESENCE_ONLY
        };
        VerifyRecord {
            ts: TimestampMs::from_millis(1_700_000_000_001),
            client_id: ClientId("bob".to_string()),
            commitment: Commitment::parse(&"ab".repeat(32)).unwrap(),
            content_hash: pvw_core::digest_bytes(b"checked content"),
            statistic: format_metric(1.0),
            pvalue: format_metric(0.01),
            decision: true,
            ticket_hash,
            policy_v,
        }
    }

    #[test]
    fn metric_formatting_keeps_decimal_point() {
        assert_eq!(format_metric(1.0), "1.0");
        assert_eq!(format_metric(0.0), "0.0");
        assert_eq!(format_metric(0.01), "0.01");
        assert_eq!(format_metric(0.05), "0.05");
    }

    #[test]
    fn record_serializes_with_type_tag() {
        let json = serde_json::to_value(LedgerRecord::Issue(issue_record())).unwrap();
        assert_eq!(json["type"], "issue");
        assert_eq!(json["model_id"], "demo-model");

        let json = serde_json::to_value(LedgerRecord::Verify(verify_record(None))).unwrap();
        assert_eq!(json["type"], "verify");
        assert_eq!(json["statistic"], "1.0");
    }

    #[test]
    fn absent_ticket_hash_is_omitted() {
        let json = serde_json::to_value(LedgerRecord::Verify(verify_record(None))).unwrap();
        assert!(json.get("ticket_hash").is_none());

        let th = TicketHash::parse(&"ef".repeat(32)).unwrap();
        let json = serde_json::to_value(LedgerRecord::Verify(verify_record(Some(th)))).unwrap();
        assert!(json.get("ticket_hash").is_some());
    }

    #[test]
    fn txid_excludes_envelope_fields() {
        let record = LedgerRecord::Issue(issue_record());
        let txid = record.txid().unwrap();

        let entry = LedgerEntry::seal(record.clone(), "f00d".to_string()).unwrap();
        assert_eq!(entry.txid, txid);

        // A different signature leaves the txid untouched.
        let other = LedgerEntry::seal(record, "beef".to_string()).unwrap();
        assert_eq!(other.txid, txid);
    }

    #[test]
    fn txid_changes_with_record_content() {
        let a = LedgerRecord::Issue(issue_record());
        let mut modified = issue_record();
        modified.model_id = "other-model".to_string();
        let b = LedgerRecord::Issue(modified);
        assert_ne!(a.txid().unwrap(), b.txid().unwrap());
    }

    #[test]
    fn entry_roundtrips_through_json_line() {
        let entry =
            LedgerEntry::seal(LedgerRecord::Verify(verify_record(None)), "aa".repeat(32)).unwrap();
        let line = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back, entry);
        assert!(back.txid_consistent().unwrap());
    }

    #[test]
    fn tampered_line_fails_txid_check() {
        let entry =
            LedgerEntry::seal(LedgerRecord::Issue(issue_record()), "aa".repeat(32)).unwrap();
        let mut value = serde_json::to_value(&entry).unwrap();
        value["model_id"] = serde_json::Value::String("forged".to_string());
        let tampered: LedgerEntry = serde_json::from_value(value).unwrap();
        assert!(!tampered.txid_consistent().unwrap());
    }

    #[test]
    fn txid_is_order_independent() {
        // Same fields, different JSON key order: canonicalization makes the
        // txid identical.
        let entry =
            LedgerEntry::seal(LedgerRecord::Issue(issue_record()), "aa".repeat(32)).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        let mut reordered = serde_json::Map::new();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.reverse();
        for k in keys {
            reordered.insert(k.clone(), obj[&k].clone());
        }
        let back: LedgerEntry =
            serde_json::from_value(serde_json::Value::Object(reordered)).unwrap();
        assert_eq!(back.record.txid().unwrap(), entry.txid);
    }
}
