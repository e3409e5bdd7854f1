mod cli;
mod converter;
mod docx_markdown;
mod docx_reader;
mod formats;
mod html_reader;
mod legacy_reader;
mod markdown;
mod pdf_reader;
mod pptx_reader;
mod reader;
mod sheet_reader;
mod text_reader;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose)?;
    converter::run(&cli);
    Ok(())
}

/// Logs go to stderr; stdout carries the conversion report.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "doc2md=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}
