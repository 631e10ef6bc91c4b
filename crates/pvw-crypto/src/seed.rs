//! # Seed Derivation — HKDF-SHA256
//!
//! Derives the per-issuance secret seed from a ticket and the server salt:
//!
//! ```text
//! ikm  = SHA256(canonical(ticket))
//! seed = HKDF-SHA256(ikm, salt = server_salt, info = "pvw-seed-v1", L = 32)
//! ```
//!
//! ## Determinism
//!
//! Identical ticket + identical salt always yield identical seed bytes.
//! This is what lets verification recompute the seed from a resubmitted
//! ticket without the seed ever being persisted or transmitted.
//!
//! ## Security Invariants
//!
//! - The seed is never serialized, logged, or stored; `Seed` implements no
//!   `Serialize`, zeroizes on drop, and redacts `Debug`.
//! - Derivation failure is terminal. There is no fallback to a weaker
//!   construction.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use pvw_core::{digest_canonical, Ticket};

use crate::error::CryptoError;
use crate::secrets::ServerSalt;

/// Fixed HKDF context label. Changing this value changes every derived
/// seed, so it is versioned: a new derivation scheme gets a new label.
pub const SEED_INFO: &[u8] = b"pvw-seed-v1";

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 32;

/// 32 bytes of per-issuance secret key material.
///
/// Owned exclusively by the issuance (or verification) operation deriving
/// it; dropped — and zeroized — once the embedder or detector has consumed
/// it.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Access the raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seed(<secret>)")
    }
}

/// Derive the per-issuance seed for a ticket under the server salt.
///
/// # Errors
///
/// Returns `CryptoError::Canonicalization` if the ticket cannot be
/// canonicalized, or `CryptoError::Derivation` if HKDF expansion fails.
pub fn derive_seed(ticket: &Ticket, salt: &ServerSalt) -> Result<Seed, CryptoError> {
    let canonical = ticket.canonical()?;
    let ikm = digest_canonical(&canonical);

    let hk = Hkdf::<Sha256>::new(Some(salt.as_bytes()), ikm.as_bytes());
    let mut okm = [0u8; SEED_LEN];
    hk.expand(SEED_INFO, &mut okm)
        .map_err(|e| CryptoError::Derivation(format!("HKDF expand failed: {e}")))?;

    Ok(Seed(okm))
}
