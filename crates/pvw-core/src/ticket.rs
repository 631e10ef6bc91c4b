//! # Proof-of-Work Tickets
//!
//! Defines `Ticket`, the client-supplied admission token: a (client,
//! endpoint, body hash, nonce, difficulty) tuple proving a minimum amount
//! of hash computation was spent on a specific piece of content.
//!
//! ## Canonical Form
//!
//! The ticket's canonical form is the JCS serialization of its five fields:
//! sorted keys, compact separators, UTF-8. Scalar normalization happens at
//! the type level — `nonce` is always a string, `difficulty` is always an
//! integer — so two tickets with identical field values canonicalize to the
//! same bytes regardless of field order or whether the caller supplied the
//! nonce as a JSON number or string.
//!
//! The canonical form is the input to both the ticket hash (recorded in
//! receipts) and seed derivation. Any instability here would make issued
//! watermarks unverifiable.
//!
//! ## Nonce Normalization
//!
//! A JSON integer nonce is normalized to its decimal string form (`5` and
//! `"5"` are the same ticket). The mapping is strict string equality beyond
//! that: `"05"` and `"5"` are *different* tickets, because re-interpreting
//! nonces numerically would weaken the PoW binding.

use serde::{Deserialize, Deserializer, Serialize};

use crate::canonical::CanonicalBytes;
use crate::digest::digest_canonical;
use crate::error::{CanonicalizationError, CoreError};
use crate::identity::TicketHash;

/// A client-supplied proof-of-work ticket.
///
/// Immutable once constructed; all mutation paths go through
/// deserialization or [`Ticket::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Client identifier bound into the PoW material.
    pub client_id: String,
    /// Endpoint name the ticket was solved for (e.g. `"/issue"`).
    pub endpoint: String,
    /// SHA-256 hex of the content body the ticket admits.
    pub body_hash: String,
    /// Solved nonce, string-normalized.
    #[serde(deserialize_with = "nonce_string_or_integer")]
    pub nonce: String,
    /// Required count of leading zero bits in the PoW digest.
    pub difficulty: u32,
}

impl Ticket {
    /// Construct a ticket from its field values.
    pub fn new(
        client_id: impl Into<String>,
        endpoint: impl Into<String>,
        body_hash: impl Into<String>,
        nonce: impl Into<String>,
        difficulty: u32,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            endpoint: endpoint.into(),
            body_hash: body_hash.into(),
            nonce: nonce.into(),
            difficulty,
        }
    }

    /// The canonical byte form of this ticket.
    ///
    /// Pure function of the field values: independent of field order and
    /// caller-chosen nonce representation.
    pub fn canonical(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }

    /// SHA-256 hex of the canonical form.
    pub fn hash(&self) -> Result<TicketHash, CoreError> {
        let canonical = self.canonical()?;
        Ok(TicketHash::from_digest(&digest_canonical(&canonical)))
    }

    /// The admission material hashed by the PoW gate:
    /// `"{client_id}|{endpoint}|{body_hash}|{nonce}"`.
    pub fn pow_material(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.client_id, self.endpoint, self.body_hash, self.nonce
        )
    }
}

/// Deserialize a nonce from either a JSON string or a JSON integer.
///
/// Integers normalize to their decimal string form. Floats are rejected —
/// a fractional nonce has no meaningful PoW interpretation.
fn nonce_string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NonceRepr {
        Text(String),
        Number(serde_json::Number),
    }

    match NonceRepr::deserialize(deserializer)? {
        NonceRepr::Text(s) => Ok(s),
        NonceRepr::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(n.to_string())
            } else {
                Err(serde::de::Error::custom(format!(
                    "nonce must be a string or integer, got float: {n}"
                )))
            }
        }
    }
}
