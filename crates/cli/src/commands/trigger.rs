// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `imgqa trigger` - schedule the image tests of a build

use super::{build_service, openqa_client, ServerArgs, SuiteArgs};
use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use clap::Args;
use imgqa_adapters::{BuildService, OpenQaClient};
use imgqa_core::{Build, DistroTestSuite, HostOs};
use imgqa_engine::{ArtifactResolver, Composer, RunOptions, TriggerEngine, TriggerRecord};
use serde::Serialize;
use std::path::PathBuf;

/// Test distribution used when `--git-remote` is not given.
pub const DEFAULT_GIT_REMOTE: &str = "https://github.com/OSInside/kiwi-functional-tests.git";

#[derive(Args, Debug)]
pub struct TriggerArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub suites: SuiteArgs,

    /// Git repository the tests are loaded from (`url#branch` selects a branch)
    #[arg(long, default_value = DEFAULT_GIT_REMOTE)]
    pub git_remote: String,

    /// Build id of the scheduled tests (default: today as YYYYMMDD)
    #[arg(long)]
    pub build: Option<String>,

    /// Operating system of the openQA workers
    #[arg(long, default_value_t = HostOs::Opensuse)]
    pub openqa_host_os: HostOs,

    /// Compose and print the requests without creating jobs
    #[arg(long)]
    pub dry_run: bool,

    /// Let openQA fetch the images over https. Only works when the openQA
    /// host can reach the download mirror via TLS.
    #[arg(long)]
    pub use_https_for_asset_download: bool,

    /// Where to write the build snapshot (default: a timestamped file in the
    /// current directory)
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct RecordView<'a> {
    package: &'a str,
    kind: String,
    firmware_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a imgqa_core::ParameterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<&'a imgqa_core::JobCreationReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a TriggerRecord> for RecordView<'a> {
    fn from(record: &'a TriggerRecord) -> Self {
        Self {
            package: &record.package,
            kind: record.kind.to_string(),
            firmware_mode: record.firmware_mode,
            params: record.params.as_ref().ok(),
            reply: record.reply.as_ref(),
            error: record.error(),
        }
    }
}

pub async fn handle(args: TriggerArgs, format: OutputFormat) -> Result<()> {
    let suites = prepare_suites(&args)?;
    let config = Config::load()?;
    let client = openqa_client(args.server.endpoint(), &config)?;
    let resolver = ArtifactResolver::new(build_service(&config)?)
        .with_download_domain(config.obs.download_domain.clone());
    let engine = TriggerEngine::new(client, Composer::new(resolver));
    run(&engine, &suites, &args, format).await
}

/// Selected suites with the download scheme applied.
fn prepare_suites(args: &TriggerArgs) -> Result<Vec<DistroTestSuite>> {
    let mut suites = args.suites.select()?;
    for suite in &mut suites {
        suite.set_use_secure_download(args.use_https_for_asset_download);
    }
    Ok(suites)
}

fn run_options(args: &TriggerArgs) -> RunOptions {
    let build = match &args.build {
        Some(build) => build.clone(),
        None => chrono::Local::now().format("%Y%m%d").to_string(),
    };
    RunOptions { casedir: args.git_remote.clone(), build, host_os: args.openqa_host_os }
}

pub async fn run<C: OpenQaClient, B: BuildService>(
    engine: &TriggerEngine<C, B>,
    suites: &[DistroTestSuite],
    args: &TriggerArgs,
    format: OutputFormat,
) -> Result<()> {
    let options = run_options(args);
    let (build, records) = engine.trigger_all(suites, &options, args.dry_run).await?;

    match format {
        OutputFormat::Json => {
            let views: Vec<RecordView<'_>> = records.iter().map(RecordView::from).collect();
            print_json(&views)?;
        }
        OutputFormat::Text => print_records(&records, args.dry_run),
    }
    if args.dry_run {
        return Ok(());
    }

    let path = write_state(&build, args.state_file.clone())?;
    eprintln!("Wrote build state into {}", path.display());

    let failed = records.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        return Err(ExitError::partial(format!(
            "{failed} of {} job combinations failed",
            records.len()
        ))
        .into());
    }
    Ok(())
}

fn print_records(records: &[TriggerRecord], dry_run: bool) {
    for record in records {
        let mode = if record.firmware_mode { "efi" } else { "bios" };
        if let Some(error) = record.error() {
            println!("{} ({mode}): error: {error}", record.package);
            continue;
        }
        match (&record.params, &record.reply) {
            (Ok(params), _) if dry_run => println!("POST isos {params}"),
            (_, Some(reply)) => {
                let ids: Vec<String> = reply.ids.iter().map(ToString::to_string).collect();
                println!("{} ({mode}): {} job(s) {}", record.package, reply.count, ids.join(" "));
            }
            _ => {}
        }
    }
}

fn write_state(build: &Build, state_file: Option<PathBuf>) -> Result<PathBuf> {
    match state_file {
        Some(path) => {
            imgqa_storage::save(&path, build)?;
            Ok(path)
        }
        None => {
            let now = chrono::Local::now().naive_local();
            Ok(imgqa_storage::save_in(std::path::Path::new("."), build, now)?)
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
