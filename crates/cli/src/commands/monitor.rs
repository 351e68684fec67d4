// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `imgqa monitor` - follow a triggered build through its state file

use super::openqa_client;
use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::{print_json, render_jobs, JobRow, OutputFormat};
use anyhow::Result;
use clap::Args;
use imgqa_adapters::OpenQaClient;
use imgqa_core::{Build, CancelFailure, FailurePolicy, Job, JobId, RestartFailure};
use imgqa_engine::BuildTracker;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Build snapshot written by `imgqa trigger`
    pub state_file: PathBuf,

    /// Work on the jobs as scheduled, ignoring re-runs
    #[arg(long)]
    pub no_resolve_clones: bool,

    /// Print the state of every job
    #[arg(short = 'p', long)]
    pub print_state: bool,

    /// With --print-state: only jobs that failed
    #[arg(short = 'f', long, requires = "print_state")]
    pub failed_only: bool,

    /// With --print-state: show selected settings (-v) or all of them (-vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Print the ids of the jobs that are neither done nor cancelled
    #[arg(long)]
    pub unfinished: bool,

    /// Restart every failed job
    #[arg(long)]
    pub restart_failed: bool,

    /// Cancel every job of the build
    #[arg(short = 'c', long)]
    pub cancel: bool,
}

impl MonitorArgs {
    fn has_action(&self) -> bool {
        self.print_state || self.unfinished || self.restart_failed || self.cancel
    }
}

/// Everything one monitor run found or did, for `--output json`.
#[derive(Debug, Default, Serialize)]
struct MonitorReport<'a> {
    build: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    jobs: Option<Vec<JobRow<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfinished: Option<Vec<JobId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    restarted: Option<Vec<JobId>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    restart_failures: Vec<RestartFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancel_failures: Option<Vec<CancelFailure>>,
}

pub async fn handle(args: MonitorArgs, format: OutputFormat) -> Result<()> {
    if !args.has_action() {
        return Err(ExitError::usage(
            "nothing to do: pass --print-state, --unfinished, --restart-failed or --cancel",
        )
        .into());
    }
    let build = load_build(&args.state_file)?;
    let config = Config::load()?;
    let tracker = BuildTracker::new(openqa_client(build.endpoint(), &config)?);
    run(&tracker, build, &args, format).await
}

fn load_build(path: &std::path::Path) -> Result<Build> {
    imgqa_storage::load(path).map_err(|e| ExitError::usage(e.to_string()).into())
}

pub async fn run<C: OpenQaClient>(
    tracker: &BuildTracker<C>,
    build: Build,
    args: &MonitorArgs,
    format: OutputFormat,
) -> Result<()> {
    let build = if args.no_resolve_clones { build } else { tracker.resolve_clones(&build).await? };
    let endpoint = build.endpoint();
    let policy = FailurePolicy::default();

    let mut jobs: Vec<Job> = Vec::new();
    let mut report = MonitorReport { build: &build.build, ..MonitorReport::default() };

    if args.print_state {
        jobs = tracker
            .fetch_states(&build)
            .await?
            .into_values()
            .filter(|job| !args.failed_only || (job.is_finished() && policy.is_failed(job.result)))
            .collect();
    }
    if args.unfinished {
        report.unfinished = Some(tracker.unfinished_jobs(&build).await?);
    }
    let mut failed = 0;
    if args.restart_failed {
        let summary = tracker.restart_failed(&build, &policy).await?;
        failed += summary.failures.len();
        report.restarted = Some(summary.restarted);
        report.restart_failures = summary.failures;
    }
    if args.cancel {
        let failures = tracker.cancel_all(&build).await;
        failed += failures.len();
        report.cancel_failures = Some(failures);
    }

    match format {
        OutputFormat::Json => {
            if args.print_state {
                report.jobs = Some(jobs.iter().map(|job| JobRow::new(&endpoint, job)).collect());
            }
            print_json(&report)?;
        }
        OutputFormat::Text => {
            if args.print_state {
                print!("{}", render_jobs(&endpoint, &jobs, args.verbosity));
            }
            print_text(&report);
        }
    }

    if failed > 0 {
        return Err(ExitError::partial(format!("{failed} job request(s) failed")).into());
    }
    Ok(())
}

fn print_text(report: &MonitorReport<'_>) {
    if let Some(unfinished) = &report.unfinished {
        for id in unfinished {
            println!("{id}");
        }
    }
    if let Some(restarted) = &report.restarted {
        for id in restarted {
            println!("Restarted job {id}");
        }
    }
    for failure in &report.restart_failures {
        println!("{failure}");
    }
    if let Some(failures) = &report.cancel_failures {
        for failure in failures {
            println!("{failure}");
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
