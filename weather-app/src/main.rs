//! Binary crate for the composable weather app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and selecting client variants
//! - The view model composing the injected clients
//! - Terminal rendering and interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
