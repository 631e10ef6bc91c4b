//! # pvw CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags map onto the tracing filter.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pvw_cli::issue::{run_issue, IssueArgs};
use pvw_cli::solve::{run_solve, SolveArgs};
use pvw_cli::verify::{run_verify, VerifyArgs};

/// PoW-gated watermark attestation driver.
///
/// Solves proof-of-work tickets, issues watermark attestations, and
/// verifies content against the signed append-only ledger kept under the
/// data directory.
#[derive(Parser, Debug)]
#[command(name = "pvw", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the ledger and server secrets.
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for a nonce satisfying a PoW difficulty; prints the ticket.
    Solve(SolveArgs),

    /// Watermark text and append the signed issue record.
    Issue(IssueArgs),

    /// Verify content against a ticket, commitment, or txid.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Solve(args) => run_solve(&args),
        Commands::Issue(args) => run_issue(&args, &cli.data_dir),
        Commands::Verify(args) => run_verify(&args, &cli.data_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
