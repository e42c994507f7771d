//! Binary crate for the `weatherjoke` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Prompting for the city and for configuration
//! - Human-friendly output (colors, spinner)

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;
mod render;
mod spinner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case.
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// Diagnostics go to stderr and stay off unless `-v` or `RUST_LOG` asks for them,
/// so the session transcript is the only thing a user normally sees.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        1 => EnvFilter::new("warn,weatherjoke_core=info,weatherjoke=info"),
        2 => EnvFilter::new("warn,weatherjoke_core=debug,weatherjoke=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
