mod cli;
mod commands;
mod common;
mod output;
mod pipeline;
mod transform;
mod whitelist;

use anyhow::Result;
use clap::Parser;

use cli::CleanArgs;
use commands::run_clean;

fn main() -> Result<()> {
    let args = CleanArgs::parse();
    run_clean(args)?;
    Ok(())
}
