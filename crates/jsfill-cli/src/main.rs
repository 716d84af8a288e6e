//! # jsfill CLI entry point
//!
//! Parses command-line arguments, initializes logging on stderr, and runs
//! the fill command against the process's stdin and stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jsfill_cli::fill::{run_fill, FillArgs};
use jsfill_cli::EXIT_ERROR;

/// Fill a JSON/YAML document with the defaults declared in a JSON Schema,
/// then validate the result against that schema.
#[derive(Parser, Debug)]
#[command(name = "jsfill", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    fill: FillArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jsfill starting");

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();

    match run_fill(&cli.fill, stdin, &mut stdout, &mut stderr) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
