//! # pvw-core — Foundational Types for the PVW Stack
//!
//! This crate is the bedrock of the PVW (proof-of-work provable
//! watermarking) Stack. It defines the type-system primitives that enforce
//! correctness guarantees at compile time. Every other crate in the
//! workspace depends on `pvw-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL ticket hashes, txids, and signing
//!    input flow through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for digests. Ever. One serialization path means
//!    seeds recomputed at verification time always match issuance.
//!
//! 2. **Newtype wrappers for identifier namespaces.** `TxId`, `Commitment`,
//!    `TicketHash`, `ClientId` — no bare strings crossing component seams.
//!
//! 3. **Scalar normalization at the type level.** `Ticket` owns the
//!    nonce string-normalization rule, so canonicalization never has to
//!    guess at caller intent.
//!
//! 4. **Integer timestamps.** `TimestampMs` serializes as a JSON integer,
//!    the only number form the canonical pipeline accepts.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pvw-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod ticket;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{bytes_to_hex, digest_bytes, digest_canonical, hex_to_bytes, Sha256Digest};
pub use error::{CanonicalizationError, CoreError};
pub use identity::{ClientId, Commitment, TicketHash, TxId};
pub use temporal::TimestampMs;
pub use ticket::Ticket;
