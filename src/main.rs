//! Memento CLI: set folders, scan, and export photo memories.

use anyhow::Result;
use clap::Parser;
use memento::engine::arg_parser::Cli;
use memento::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
