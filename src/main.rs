//! Fruit bill command-line entry point.
//!
//! Reads a catalog, prices the requested items and prints the bill as a
//! receipt table or as JSON.

use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{error, info};

use fruit_bill::prelude::*;

use crate::cli::config::{BillConfig, OutputFormat};

mod cli;

fn main() -> ExitCode {
    let config = BillConfig::parse();

    if let Err(init_error) = cli::logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("failed to initialise logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("{run_error:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &BillConfig) -> Result<()> {
    let order = match &config.request {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read request {}", path.display()))?;

            Order::from_json_str(&contents)?
        }
        None => Order::parse_args(&config.items)?,
    };

    info!(
        items = order.len(),
        catalog = %config.catalog.display(),
        "received bill request"
    );

    let source = FileCatalog::new(&config.catalog);

    let start = Instant::now();
    let bill = compute_bill_from_source(Some(order.lines()), &source)?;
    let elapsed = start.elapsed();

    info!(
        total_quantity = bill.total_quantity(),
        total_charge = %format_amount(bill.total_charge()),
        "bill computed"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &bill)?;
            writeln!(handle)?;
        }
        OutputFormat::Table => {
            Receipt::new(&bill).write_to(&mut handle)?;

            writeln!(
                handle,
                "\n {} ({}s)",
                elapsed.human(Truncate::Nano),
                elapsed.as_secs_f32()
            )?;
        }
    }

    Ok(())
}
