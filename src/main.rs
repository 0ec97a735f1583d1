mod cli;
mod clipboard;
mod docs_scanner;
mod error;
mod prompt;
mod root;
mod selector;
mod utils;
mod workflow;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::Level;

fn main() -> Result<()> {
    // Handle daemon mode first. This should stay in main.rs as it's an early exit.
    if clipboard::check_and_run_daemon_if_requested()? {
        return Ok(());
    }

    let cli_args = cli::Cli::parse();
    init_logging(cli_args.verbose);

    if let Err(e) = workflow::run_docyank(cli_args) {
        tracing::error!("{:#}", e);
        // stdout may be the thing that failed.
        let _ = writeln!(io::stdout(), "An unexpected error occurred: {:#}", e);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
