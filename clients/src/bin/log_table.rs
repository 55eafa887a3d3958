//! `log-table` — Generates the Verilog log lookup module.
//!
//! Computes the fixed-point natural-log table and writes it as a
//! combinational `LogTable` module. With `--verify`, checks an existing file
//! against a freshly computed table instead of writing.
//!
//! **Usage:**
//! ```
//! log-table [--size <N>] [--out <path>] [--verify]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use logtable_codegen::{DEFAULT_OUTPUT, DEFAULT_SIZE};

/// Generate the Verilog log lookup table.
#[derive(Debug, Parser)]
#[command(
    name = "log-table",
    about = "Generate a Verilog lookup module of fixed-point natural logarithms"
)]
struct Args {
    /// Number of table entries.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Output file for the generated module.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Check an existing file against the table instead of writing one.
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    if args.verify {
        let entries = logtable_codegen::verify(args.size, &args.out)
            .with_context(|| format!("Failed to verify {}", args.out.display()))?;
        println!(
            "'{}' matches the log table with {} entries.",
            args.out.display(),
            entries
        );
        return Ok(());
    }

    let report = logtable_codegen::generate(args.size, &args.out)
        .with_context(|| format!("Failed to generate {}", args.out.display()))?;

    println!(
        "Verilog code for log table with {} entries has been generated and saved to '{}'.",
        report.entries,
        report.path.display()
    );
    Ok(())
}
