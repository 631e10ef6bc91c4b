//! # pvw-cli — Command-line driver for the watermark attestation stack
//!
//! Provides the `pvw` binary: local PoW solving, watermark issuance, and
//! verification against the ledger under a data directory. Each subcommand
//! lives in its own module and returns a process exit code; `main` owns
//! argument parsing and tracing setup.

pub mod issue;
pub mod solve;
pub mod verify;
