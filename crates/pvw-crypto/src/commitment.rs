//! # Commitment Scheme
//!
//! Computes the public commitment binding a secret seed to an issuance:
//! `SHA256(seed || server_salt)`, hex-encoded.
//!
//! One-way in both directions that matter: the commitment reveals nothing
//! about the seed without the salt, and a party holding only the commitment
//! (and even the salt) cannot recover the seed. Correctness checks compare
//! recomputed commitments, never seeds.

use sha2::{Digest, Sha256};

use pvw_core::{Commitment, Sha256Digest};

use crate::secrets::ServerSalt;
use crate::seed::Seed;

/// Compute the public commitment for a seed under the server salt.
pub fn commit(seed: &Seed, salt: &ServerSalt) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(salt.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    Commitment::from_digest(&Sha256Digest::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::ServerSalt;
    use crate::seed::derive_seed;
    use pvw_core::Ticket;

    fn seed_and_salt() -> (Seed, ServerSalt) {
        let salt = ServerSalt::from_bytes([0x11; 32]);
        let ticket = Ticket::new("alice", "/issue", "00".repeat(32), "7", 8);
        (derive_seed(&ticket, &salt).unwrap(), salt)
    }

    #[test]
    fn commitment_is_stable() {
        let (seed, salt) = seed_and_salt();
        assert_eq!(commit(&seed, &salt), commit(&seed, &salt));
    }

    #[test]
    fn changing_salt_changes_commitment() {
        let (seed, salt) = seed_and_salt();
        let other_salt = ServerSalt::from_bytes([0x99; 32]);
        assert_ne!(commit(&seed, &salt), commit(&seed, &other_salt));
    }

    #[test]
    fn changing_seed_changes_commitment() {
        let (seed, salt) = seed_and_salt();
        let other_ticket = Ticket::new("bob", "/issue", "00".repeat(32), "7", 8);
        let other_seed = derive_seed(&other_ticket, &salt).unwrap();
        assert_ne!(commit(&seed, &salt), commit(&other_seed, &salt));
    }

    #[test]
    fn commitment_is_64_hex_chars() {
        let (seed, salt) = seed_and_salt();
        let c = commit(&seed, &salt);
        assert_eq!(c.as_str().len(), 64);
        assert!(c.as_str().chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
