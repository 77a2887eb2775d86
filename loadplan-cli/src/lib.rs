//! Command-line interface for offline route capacity evaluation.
//!
//! `loadplan evaluate <request.json>` reads bookings and an item catalogue,
//! evaluates them against one or more service tiers and prints the plans as
//! JSON on stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod evaluate;
mod fs;

pub use error::CliError;
use evaluate::{EvaluateArgs, run_evaluate};

const ARG_EVALUATE_REQUEST: &str = "request-path";
const ARG_EVALUATE_FLEET: &str = "fleet";
const ARG_EVALUATE_TIERS: &str = "tiers";
const ARG_EVALUATE_SEQUENCING: &str = "sequencing";
const ENV_EVALUATE_REQUEST: &str = "LOADPLAN_CMDS_EVALUATE_REQUEST_PATH";

/// Run the loadplan CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or inputs are invalid,
/// or when the plans cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Evaluate(args) => run_evaluate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "loadplan",
    about = "Check whether multi-stop van routes fit their service tier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a route against one or more service tiers.
    Evaluate(EvaluateArgs),
}

#[cfg(test)]
mod tests;
