//! # Verify CLI — Check content against an attestation.
//!
//! Exactly one evidence flag must be given:
//!
//! ```bash
//! # Strong path: the original issuance ticket (JSON from `pvw solve`).
//! pvw verify --client-id alice --content "$MARKED" --ticket "$TICKET_JSON"
//!
//! # Weak paths: a receipt commitment, or a ledger txid.
//! pvw verify --client-id alice --content "$MARKED" --commitment <hex>
//! pvw verify --client-id alice --content "$MARKED" --txid <hex>
//! ```
//!
//! Prints the outcome (decision, detection numbers, signed transcript) as
//! JSON. Exit code 0 when the watermark was judged present, 2 when absent.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};

use pvw_core::{ClientId, Commitment, Ticket, TxId};
use pvw_service::{ServiceConfig, VerifyEvidence, VerifyRequest, WatermarkService};

/// Verify subcommand arguments.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("evidence").required(true).args(["ticket", "commitment", "txid"])))]
pub struct VerifyArgs {
    /// Client identifier recorded in the verify record.
    #[arg(long)]
    pub client_id: String,

    /// Content under test.
    #[arg(long)]
    pub content: String,

    /// Original issuance ticket as JSON (seed-bound detection).
    #[arg(long)]
    pub ticket: Option<String>,

    /// Commitment from an issuance receipt (presence-only detection).
    #[arg(long)]
    pub commitment: Option<String>,

    /// Ledger txid of the issuance (presence-only detection).
    #[arg(long)]
    pub txid: Option<String>,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, data_dir: &Path) -> Result<u8> {
    let evidence = if let Some(json) = &args.ticket {
        let ticket: Ticket = serde_json::from_str(json).context("invalid ticket JSON")?;
        VerifyEvidence::Ticket(ticket)
    } else if let Some(hex) = &args.commitment {
        VerifyEvidence::Commitment(Commitment::parse(hex).context("invalid commitment")?)
    } else if let Some(hex) = &args.txid {
        VerifyEvidence::Txid(TxId::parse(hex).context("invalid txid")?)
    } else {
        // clap's ArgGroup guarantees one flag was given.
        anyhow::bail!("no evidence supplied");
    };

    let config = ServiceConfig::load(data_dir).context("failed to load service configuration")?;
    let service = WatermarkService::new(config)?;
    let outcome = service.verify(VerifyRequest {
        client_id: ClientId(args.client_id.clone()),
        content: args.content.clone(),
        evidence,
        pow: None,
    })?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(if outcome.decision { 0 } else { 2 })
}
