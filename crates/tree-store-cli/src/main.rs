mod cli;
mod commands;
mod loader;
mod render;

use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;
use tree_store::TreeStore;

use crate::cli::Args;

/// Exit code when `check` finds issues; clap already uses 2 for usage errors
const CHECK_FAILED: u8 = 3;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(CHECK_FAILED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded
fn run(args: &Args) -> Result<bool> {
    debug!("{:?}", args);

    let options = loader::load_options(args.config.as_deref(), args.strict)?;
    let records = loader::load_records(&args.file)?;
    info!("Loaded {} records from {}", records.len(), args.file.display());

    let store = TreeStore::with_options(records, &options)?;
    let outcome = commands::execute(&store, &args.query(), args.order.into())?;
    print!("{}", outcome.output);
    Ok(outcome.success)
}
