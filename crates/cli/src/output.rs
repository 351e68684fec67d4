// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use crate::table::Table;
use clap::ValueEnum;
use imgqa_core::{severity, DistroTestSuite, Endpoint, Job, JobState, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings shown with `-v`.
const VERBOSE_SETTINGS: &[&str] = &["DISTRI", "FLAVOR", "VERSION", "UEFI", "HDD_1", "ISO_1"];

/// One job in `monitor --print-state` output.
#[derive(Debug, Clone, Serialize)]
pub struct JobRow<'a> {
    pub id: u64,
    pub url: String,
    pub state: JobState,
    pub result: imgqa_core::JobResult,
    pub settings: &'a BTreeMap<String, String>,
}

impl<'a> JobRow<'a> {
    pub fn new(endpoint: &Endpoint, job: &'a Job) -> Self {
        Self {
            id: job.id.get(),
            url: endpoint.test_url(job.id),
            state: job.state,
            result: job.result,
            settings: &job.settings,
        }
    }
}

/// Severity shown for a job's state column. Results only count once the job
/// is finished.
pub fn job_severity(job: &Job) -> Severity {
    if job.is_finished() {
        severity(job.result)
    } else {
        Severity::Pending
    }
}

/// `KEY  value` lines, keys padded to a common width.
pub fn format_settings<'a>(settings: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let pairs: Vec<(&str, &str)> = settings.into_iter().collect();
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs.iter().map(|(k, v)| format!("{k:<width$}  {v}")).collect::<Vec<_>>().join("\n")
}

/// Settings column: summary, selected keys (`-v`) or everything (`-vv`).
pub fn settings_column(job: &Job, verbosity: u8) -> String {
    match verbosity {
        0 => job.summary(),
        1 => format_settings(
            VERBOSE_SETTINGS.iter().filter_map(|&k| job.setting(k).map(|v| (k, v))),
        ),
        _ => format_settings(job.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
    }
}

pub fn render_jobs(endpoint: &Endpoint, jobs: &[Job], verbosity: u8) -> String {
    let mut table = Table::new(&["test URL", "state", "result", "settings"]);
    for job in jobs {
        let level = job_severity(job);
        table.row(vec![
            endpoint.test_url(job.id),
            color::severity(&job.state.to_string(), level),
            job.result.to_string(),
            settings_column(job, verbosity),
        ]);
    }
    if table.is_empty() {
        return format!("{}\n", color::muted("no jobs"));
    }
    table.render()
}

pub fn render_catalog(suites: &[DistroTestSuite]) -> String {
    let mut table = Table::new(&["suite", "kind", "package", "modes", "extra"]);
    for suite in suites {
        for artifact in &suite.artifacts {
            let modes: Vec<&str> = suite
                .firmware_modes(artifact)
                .iter()
                .map(|&efi| if efi { "efi" } else { "bios" })
                .collect();
            table.row(vec![
                suite.key(),
                artifact.kind.to_string(),
                artifact.package.clone(),
                modes.join(","),
                artifact.extra_params.to_string(),
            ]);
        }
    }
    table.render()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
