//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the PVW Stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `Commitment` where a `TxId` is expected, even though both are
//! 64-character hex strings on the wire.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion where a ledger transaction id is substituted
//! for an issuance commitment or vice versa.

use serde::{Deserialize, Deserializer, Serialize};

use crate::digest::Sha256Digest;
use crate::error::CoreError;

/// Client identifier presented with every issuance/verification request.
///
/// Opaque to the core — the PoW gate binds it into the admission hash but
/// no authentication is attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ledger transaction id: SHA-256 hex of a record's canonical form.
///
/// Content-derived, not a uniqueness-enforcing primary key — two records
/// with identical fields share a txid, and lookup returns the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TxId(String);

/// Public commitment binding an issuance to its secret seed:
/// hex of `SHA256(seed || server_salt)`.
///
/// Safe to persist and return to clients; reveals nothing about the seed
/// without the server salt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Commitment(String);

/// SHA-256 hex of a ticket's canonical form.
///
/// Recorded in receipts so a client can later prove which ticket an
/// issuance was bound to without the server storing the ticket itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TicketHash(String);

macro_rules! hex_identifier {
    ($name:ident, $label:literal) => {
        impl $name {
            /// Construct from a digest computed by this stack.
            pub fn from_digest(digest: &Sha256Digest) -> Self {
                Self(digest.to_hex())
            }

            /// Parse and validate a 64-character hex string.
            pub fn parse(hex: &str) -> Result<Self, CoreError> {
                let h = hex.trim().to_lowercase();
                if h.len() != 64 || !h.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(CoreError::InvalidIdentifier(format!(
                        concat!($label, " must be 64 hex chars, got {:?}"),
                        hex
                    )));
                }
                Ok(Self(h))
            }

            /// Access the hex string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let hex = String::deserialize(deserializer)?;
                Self::parse(&hex).map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_identifier!(TxId, "txid");
hex_identifier!(Commitment, "commitment");
hex_identifier!(TicketHash, "ticket hash");
