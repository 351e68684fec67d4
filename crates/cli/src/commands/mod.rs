// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod catalog;
pub mod job;
pub mod monitor;
pub mod trigger;

use crate::config::Config;
use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use clap::Args;
use imgqa_adapters::{HttpBuildService, HttpOpenQa};
use imgqa_core::build::DEFAULT_SERVER;
use imgqa_core::catalog as suite_catalog;
use imgqa_core::{parse_matrix, DistroTestSuite, Endpoint, Scheme};
use std::path::{Path, PathBuf};

/// openQA instance selection
#[derive(Args, Clone, Debug)]
pub struct ServerArgs {
    /// openQA server to talk to
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    /// URL scheme of the openQA server
    #[arg(long, default_value_t = Scheme::Https)]
    pub server_scheme: Scheme,
}

impl ServerArgs {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.server.clone(), self.server_scheme)
    }
}

/// Which suites a command works on
#[derive(Args, Clone, Debug, Default)]
pub struct SuiteArgs {
    /// Only these distributions (default: all)
    #[arg(
        short = 'd',
        long,
        num_args = 1..,
        value_parser = clap::builder::PossibleValuesParser::new(suite_catalog::DISTRIBUTIONS.iter().copied()),
        conflicts_with = "version_distri"
    )]
    pub distri: Vec<String>,

    /// Only these `<version>+<distri>` suites, e.g. `Tumbleweed+opensuse`
    #[arg(long = "version-distri", num_args = 1..)]
    pub version_distri: Vec<String>,

    /// Read the suites from a TOML matrix instead of the built-in catalog
    #[arg(long, value_name = "FILE")]
    pub matrix: Option<PathBuf>,
}

impl SuiteArgs {
    pub fn select(&self) -> Result<Vec<DistroTestSuite>> {
        let available = match &self.matrix {
            Some(path) => load_matrix(path)?,
            None => suite_catalog::all(),
        };
        if !self.distri.is_empty() {
            return Ok(suite_catalog::select_distros(available, &self.distri));
        }
        if self.version_distri.is_empty() {
            return Ok(available);
        }
        self.version_distri
            .iter()
            .map(|key| {
                suite_catalog::find(&available, key).cloned().ok_or_else(|| {
                    let known: Vec<String> = available.iter().map(DistroTestSuite::key).collect();
                    anyhow::Error::from(ExitError::usage(format!(
                        "unknown suite '{key}', expected one of: {}",
                        known.join(", ")
                    )))
                })
            })
            .collect()
    }
}

fn load_matrix(path: &Path) -> Result<Vec<DistroTestSuite>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read matrix {}", path.display()))?;
    parse_matrix(&content).with_context(|| format!("in matrix {}", path.display()))
}

pub fn openqa_client(endpoint: Endpoint, config: &Config) -> Result<HttpOpenQa> {
    Ok(HttpOpenQa::new(endpoint, config.openqa_credentials())?)
}

pub fn build_service(config: &Config) -> Result<HttpBuildService> {
    Ok(HttpBuildService::new(config.obs.api_url.clone(), config.obs_credentials())?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
