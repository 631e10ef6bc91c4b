//! # pvw-crypto
//!
//! Cryptographic primitives for the watermark attestation stack: the
//! proof-of-work admission gate, seed derivation, the commitment scheme,
//! HMAC record signing, and the server secret store.
//!
//! ## Layering
//!
//! Depends only on [`pvw_core`] for canonical bytes, digests, and typed
//! identifiers. Ledger and service crates consume these primitives; nothing
//! here touches the ledger format or request handling.
//!
//! ## Security Invariants
//!
//! - Every hash or MAC over structured data is computed through
//!   [`pvw_core::CanonicalBytes`]; raw-struct hashing has no entry point.
//! - Secret material ([`Seed`], [`ServerSalt`], [`ServerKey`]) zeroizes on
//!   drop, implements no `Serialize`, and redacts `Debug`.
//! - Signature and secret comparisons are constant-time.

pub mod commitment;
pub mod error;
pub mod pow;
pub mod secrets;
pub mod seed;
pub mod signer;

pub use commitment::commit;
pub use error::CryptoError;
pub use secrets::{SecretStore, ServerKey, ServerSalt, KEY_ENV_VAR, SALT_ENV_VAR};
pub use seed::{derive_seed, Seed, SEED_INFO, SEED_LEN};
pub use signer::{RecordSignature, RecordSigner};
