//! Marketflow CLI: marketing strategy analysis from the terminal.
//!
//! Collects the four form fields from flags or a preset, runs the pipeline
//! once and prints the report.

mod commands;

use anyhow::Result;
use clap::Parser;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
