//! Binary crate for the `nws-gateway` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Running the HTTP gateway
//! - Interactive configuration
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod display;

fn init_tracing() {
    // stderr keeps `show --json` output clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
