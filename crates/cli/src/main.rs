// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! imgqa: trigger kiwi image tests on openQA and follow their results

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod output;
mod table;

use clap::{Parser, Subcommand};
use commands::{catalog, job, monitor, trigger};
use exit_error::ExitError;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "imgqa",
    version,
    about = "Trigger kiwi image tests on openQA and follow their results",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule the image tests of one build
    Trigger(trigger::TriggerArgs),
    /// Inspect, restart or cancel the jobs of a triggered build
    Monitor(monitor::MonitorArgs),
    /// Inspect or restart a single job
    Job(job::JobArgs),
    /// List the test matrix
    Catalog(catalog::CatalogArgs),
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output;
    match cli.command {
        Commands::Trigger(args) => trigger::handle(args, format).await,
        Commands::Monitor(args) => monitor::handle(args, format).await,
        Commands::Job(args) => job::handle(args, format).await,
        Commands::Catalog(args) => catalog::handle(args, format),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(err) = run(cli).await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {exit}");
                exit.code
            }
            None => {
                eprintln!("error: {err:#}");
                exit_error::PARTIAL_FAILURE
            }
        };
        std::process::exit(code);
    }
}
