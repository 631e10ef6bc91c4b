//! # Issue CLI — Watermark text and record the attestation.
//!
//! ```bash
//! pvw issue --client-id alice --text "hello" --difficulty 8
//! ```
//!
//! Solves the PoW locally unless `--nonce` supplies a precomputed one, then
//! runs the issuance against the ledger under the data directory and prints
//! the outcome (watermarked text, receipt, signature) as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use pvw_core::{digest_bytes, ClientId, Ticket};
use pvw_crypto::pow;
use pvw_service::{IssueRequest, ServiceConfig, WatermarkService, ISSUE_ENDPOINT};

/// Issue subcommand arguments.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Client identifier.
    #[arg(long)]
    pub client_id: String,

    /// Model identifier recorded in the issue record.
    #[arg(long, default_value = "demo-model")]
    pub model_id: String,

    /// Text to watermark.
    #[arg(long)]
    pub text: String,

    /// PoW difficulty for the ticket.
    #[arg(long, default_value_t = 8)]
    pub difficulty: u32,

    /// Precomputed nonce; solved locally when absent.
    #[arg(long)]
    pub nonce: Option<String>,

    /// Nonce search bound when solving locally.
    #[arg(long, default_value_t = 50_000_000)]
    pub max_attempts: u64,
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs, data_dir: &Path) -> Result<u8> {
    let body_hash = digest_bytes(args.text.as_bytes()).to_hex();
    let nonce = match &args.nonce {
        Some(nonce) => nonce.clone(),
        None => pow::solve(
            &args.client_id,
            ISSUE_ENDPOINT,
            &body_hash,
            args.difficulty,
            args.max_attempts,
        )
        .with_context(|| {
            format!(
                "no nonce found for difficulty {} within {} attempts",
                args.difficulty, args.max_attempts
            )
        })?,
    };
    let ticket = Ticket::new(
        &args.client_id,
        ISSUE_ENDPOINT,
        body_hash,
        nonce,
        args.difficulty,
    );

    let config = ServiceConfig::load(data_dir).context("failed to load service configuration")?;
    let service = WatermarkService::new(config)?;
    let outcome = service.issue(IssueRequest {
        client_id: ClientId(args.client_id.clone()),
        model_id: args.model_id.clone(),
        text: args.text.clone(),
        ticket,
    })?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(0)
}
