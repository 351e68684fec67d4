// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `imgqa job` - single-job commands

use super::{openqa_client, ServerArgs};
use crate::color;
use crate::config::Config;
use crate::output::{job_severity, print_json, settings_column, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use imgqa_adapters::OpenQaClient;
use imgqa_core::{Endpoint, Job, JobId};

#[derive(Args, Debug)]
pub struct JobArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Show state, result and settings of a job
    Show {
        id: JobId,

        /// Show selected settings (-v) or all of them (-vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
    /// Re-run a job under a new id
    Restart { id: JobId },
}

pub async fn handle(args: JobArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let client = openqa_client(args.server.endpoint(), &config)?;
    run(&client, args.command, format).await
}

pub async fn run<C: OpenQaClient>(client: &C, command: JobCommand, format: OutputFormat) -> Result<()> {
    match command {
        JobCommand::Show { id, verbosity } => {
            let job = client.get_job(id).await?;
            match format {
                OutputFormat::Json => print_json(&job)?,
                OutputFormat::Text => print!("{}", format_job(client.endpoint(), &job, verbosity)),
            }
        }
        JobCommand::Restart { id } => {
            client.restart_job(id).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "restarted": id }))?,
                OutputFormat::Text => println!("Restarted job {id}"),
            }
        }
    }
    Ok(())
}

/// Key/value block describing one job.
pub fn format_job(endpoint: &Endpoint, job: &Job, verbosity: u8) -> String {
    let mut fields: Vec<(&str, String)> = vec![
        ("url", endpoint.test_url(job.id)),
        ("name", job.name.clone()),
        ("state", color::severity(&job.state.to_string(), job_severity(job))),
        ("result", job.result.to_string()),
    ];
    if let Some(clone_id) = job.clone_id {
        fields.push(("cloned as", endpoint.test_url(clone_id)));
    }
    if let Some(origin_id) = job.origin_id {
        fields.push(("clone of", endpoint.test_url(origin_id)));
    }
    if !job.children.chained.is_empty() {
        let ids: Vec<String> = job.children.chained.iter().map(ToString::to_string).collect();
        fields.push(("chained", ids.join(" ")));
    }

    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in &fields {
        out.push_str(&format!("{}  {value}\n", color::header(&format!("{key:<width$}"))));
    }
    if verbosity > 0 {
        let settings = settings_column(job, verbosity);
        if !settings.is_empty() {
            out.push('\n');
            out.push_str(&settings);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
