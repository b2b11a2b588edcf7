mod cli;
mod commands;
mod logging;
mod runner;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted by user (Ctrl+C)");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    commands::Mirror::execute(&cli)
}
