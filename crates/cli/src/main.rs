use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use widecopy::commands::{check_command, list_providers_command, sizes_command, AnalysisArgs};
use widecopy::init_tracing;

/// Exit status when at least one copy site was reported.
const EXIT_FINDINGS: u8 = 2;

/// Flags functions that pass wide structs by value.
///
/// This CLI is a thin wrapper around `widecopy-core` (exposed in code as
/// `widecopy_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "widecopy",
    version,
    about = "Find functions that copy wide structs by value",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report receivers, parameters and results that copy wide structs.
    ///
    /// Exits with status 2 when any copy site is found.
    Check {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Emit JSON instead of one line per copy site.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the computed size and alignment of every type.
    Sizes {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the available graph providers.
    Providers {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { args, json } => {
            let report = check_command(&args, json)?;
            if report.has_findings() {
                return Ok(ExitCode::from(EXIT_FINDINGS));
            }
        }
        Command::Sizes { args, json } => {
            sizes_command(&args, json)?;
        }
        Command::Providers { json } => {
            list_providers_command(json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
