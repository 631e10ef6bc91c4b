//! # Solve CLI — Search for an admissible PoW nonce.
//!
//! ```bash
//! pvw solve --client-id alice --text "hello" --difficulty 8
//! ```
//!
//! Prints the completed ticket as JSON, ready to pass to `pvw verify
//! --ticket` or a transport layer.

use anyhow::Result;
use clap::Args;

use pvw_core::{digest_bytes, Ticket};
use pvw_crypto::pow;
use pvw_service::ISSUE_ENDPOINT;

/// Solve subcommand arguments.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Client identifier bound into the PoW material.
    #[arg(long)]
    pub client_id: String,

    /// Endpoint label bound into the PoW material.
    #[arg(long, default_value = ISSUE_ENDPOINT)]
    pub endpoint: String,

    /// Text whose SHA-256 becomes the ticket body hash.
    #[arg(long)]
    pub text: String,

    /// Required leading-zero-bit count.
    #[arg(long, default_value_t = 8)]
    pub difficulty: u32,

    /// Give up after this many nonce candidates.
    #[arg(long, default_value_t = 50_000_000)]
    pub max_attempts: u64,
}

/// Execute the solve subcommand.
pub fn run_solve(args: &SolveArgs) -> Result<u8> {
    let body_hash = digest_bytes(args.text.as_bytes()).to_hex();
    match pow::solve(
        &args.client_id,
        &args.endpoint,
        &body_hash,
        args.difficulty,
        args.max_attempts,
    ) {
        Some(nonce) => {
            let ticket = Ticket::new(
                &args.client_id,
                &args.endpoint,
                body_hash,
                nonce,
                args.difficulty,
            );
            println!("{}", serde_json::to_string_pretty(&ticket)?);
            Ok(0)
        }
        None => {
            eprintln!(
                "no nonce found for difficulty {} within {} attempts",
                args.difficulty, args.max_attempts
            );
            Ok(1)
        }
    }
}
