//! Field Map Clean - missing-value cleanup for magnetic field maps
//!
//! Reads a whitespace-delimited `x y z Bx By Bz` field map, replaces missing
//! samples with 0 and writes the result as headerless CSV.

mod data;
mod logging;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fieldmap_clean")]
#[command(about = "Replace missing samples in a field map and export it as CSV")]
#[command(version)]
struct Cli {
    /// Whitespace-delimited field map (`%` starts a comment)
    #[arg(default_value = "perfTransField.txt")]
    input: PathBuf,

    /// Destination CSV file, created or overwritten
    #[arg(default_value = "perfTransField_0.txt")]
    output: PathBuf,

    /// Print the cleaning summary as JSON on stdout
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let summary = pipeline::run(&cli.input, &cli.output).inspect_err(|e| error!("{e}"))?;

    info!(
        rows = summary.rows,
        filled = summary.total_filled(),
        "done"
    );

    if cli.summary {
        println!("{}", serde_json::to_string(&summary)?);
    }

    Ok(())
}
