//! # Proof-of-Work Gate
//!
//! Validates that a ticket's nonce satisfies the required hash difficulty.
//! The gate hashes `"{client_id}|{endpoint}|{body_hash}|{nonce}"` with
//! SHA-256 and requires the digest's leading-zero-bit count to reach the
//! ticket's difficulty.
//!
//! Pure and stateless: the gate keeps nothing across calls and does no
//! nonce search itself — solving is unbounded client-side work, checking is
//! one hash. Binding `body_hash` into the material is what prevents a
//! solved nonce from being replayed against different content.

use pvw_core::{digest_bytes, Ticket};

/// Validate a PoW tuple directly from its components.
///
/// Returns `true` iff `SHA256(client_id|endpoint|body_hash|nonce)` has at
/// least `difficulty` leading zero bits. Difficulty 0 admits every nonce.
pub fn validate(
    client_id: &str,
    endpoint: &str,
    body_hash: &str,
    nonce: &str,
    difficulty: u32,
) -> bool {
    let material = format!("{client_id}|{endpoint}|{body_hash}|{nonce}");
    digest_bytes(material.as_bytes()).leading_zero_bits() >= difficulty
}

/// Validate a [`Ticket`] against its own declared difficulty.
pub fn validate_ticket(ticket: &Ticket) -> bool {
    digest_bytes(ticket.pow_material().as_bytes()).leading_zero_bits() >= ticket.difficulty
}

/// Search for a nonce satisfying the given difficulty.
///
/// Counts upward from zero, the same strategy as the demo driver. Intended
/// for tests and the CLI at small difficulties; returns `None` if no nonce
/// is found within `max_attempts`.
pub fn solve(
    client_id: &str,
    endpoint: &str,
    body_hash: &str,
    difficulty: u32,
    max_attempts: u64,
) -> Option<String> {
    (0..max_attempts).map(|n| n.to_string()).find(|nonce| {
        validate(client_id, endpoint, body_hash, nonce, difficulty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_difficulty_admits_everything() {
        assert!(validate("anyone", "/issue", "bh", "whatever", 0));
    }

    #[test]
    fn solve_then_validate_roundtrip() {
        let body_hash = pvw_core::digest_bytes(b"content").to_hex();
        let nonce = solve("test", "/issue", &body_hash, 8, 1_000_000).expect("solvable");
        assert!(validate("test", "/issue", &body_hash, &nonce, 8));
    }

    #[test]
    fn solved_nonce_fails_at_higher_difficulty() {
        // Find a nonce that clears exactly the d=4 bar but not d=20.
        let body_hash = pvw_core::digest_bytes(b"low").to_hex();
        let nonce = (0u64..1_000_000)
            .map(|n| n.to_string())
            .find(|n| {
                let material = format!("test|/issue|{body_hash}|{n}");
                let zeros = pvw_core::digest_bytes(material.as_bytes()).leading_zero_bits();
                (4..20).contains(&zeros)
            })
            .expect("solvable");
        assert!(validate("test", "/issue", &body_hash, &nonce, 4));
        assert!(!validate("test", "/issue", &body_hash, &nonce, 20));
    }

    #[test]
    fn material_binds_every_component() {
        let body_hash = pvw_core::digest_bytes(b"bound").to_hex();
        let nonce = solve("alice", "/issue", &body_hash, 8, 1_000_000).unwrap();
        assert!(validate("alice", "/issue", &body_hash, &nonce, 8));
        // A solved nonce does not transfer to a different client, endpoint,
        // or body (overwhelmingly likely for an 8-bit bar).
        let other_body = pvw_core::digest_bytes(b"other").to_hex();
        let transfers = validate("bob", "/issue", &body_hash, &nonce, 8)
            && validate("alice", "/verify", &body_hash, &nonce, 8)
            && validate("alice", "/issue", &other_body, &nonce, 8);
        assert!(!transfers);
    }

    #[test]
    fn validate_ticket_uses_declared_difficulty() {
        let body_hash = pvw_core::digest_bytes(b"ticket").to_hex();
        let nonce = solve("carol", "/issue", &body_hash, 8, 1_000_000).unwrap();
        let ok = Ticket::new("carol", "/issue", body_hash.clone(), nonce.clone(), 8);
        assert!(validate_ticket(&ok));

        let too_hard = Ticket::new("carol", "/issue", body_hash, nonce, 64);
        assert!(!validate_ticket(&too_hard));
    }

    #[test]
    fn solve_gives_up_within_bound() {
        // Difficulty 256 is unreachable; the search must terminate.
        assert!(solve("x", "/e", "bh", 256, 100).is_none());
    }
}
