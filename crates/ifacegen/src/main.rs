mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Load .env before the config file so ${VAR} references resolve.
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
        .with_writer(std::io::stderr)
        .init();

    cli.execute()
}
