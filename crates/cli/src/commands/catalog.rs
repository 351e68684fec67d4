// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `imgqa catalog` - list the suites a trigger would schedule

use super::SuiteArgs;
use crate::output::{print_json, render_catalog, OutputFormat};
use anyhow::Result;
use clap::Args;
use imgqa_core::DistroTestSuite;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub suites: SuiteArgs,
}

#[derive(Debug, Serialize)]
struct ArtifactView<'a> {
    suite: String,
    project: &'a str,
    repository: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdir: Option<&'a str>,
    package: &'a str,
    kind: String,
    firmware_modes: &'static [bool],
    extra_params: &'a imgqa_core::ParameterSet,
}

fn views(suites: &[DistroTestSuite]) -> Vec<ArtifactView<'_>> {
    suites
        .iter()
        .flat_map(|suite| {
            suite.artifacts.iter().map(move |artifact| ArtifactView {
                suite: suite.key(),
                project: &artifact.project,
                repository: &artifact.repository,
                subdir: artifact.subdir.as_deref(),
                package: &artifact.package,
                kind: artifact.kind.to_string(),
                firmware_modes: suite.firmware_modes(artifact),
                extra_params: &artifact.extra_params,
            })
        })
        .collect()
}

pub fn handle(args: CatalogArgs, format: OutputFormat) -> Result<()> {
    let suites = args.suites.select()?;
    match format {
        OutputFormat::Json => print_json(&views(&suites))?,
        OutputFormat::Text => print!("{}", render_catalog(&suites)),
    }
    Ok(())
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
