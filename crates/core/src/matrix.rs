// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative test matrices in TOML.
//!
//! ```toml
//! [[suite]]
//! distri = "opensuse"
//! version = "Tumbleweed"
//!
//! [[suite.artifact]]
//! project = "Virtualization:Appliances:Images:Testing_x86:tumbleweed"
//! package = "test-image-disk-legacy"
//! kind = "disk-image"
//! extra_params = { QEMURAM = 2048 }
//! ```
//!
//! Omitted fields take the same defaults as the [`ImageArtifact`]
//! constructors: repository `images`, ISOs under the `iso` subdirectory,
//! firmware mode supported.

use crate::artifact::{Arch, DistroTestSuite, ImageArtifact, TestKind};
use crate::params::ParameterSet;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("invalid matrix: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("suite {suite} has no artifacts")]
    EmptySuite { suite: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixFile {
    #[serde(default)]
    suite: Vec<SuiteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteEntry {
    distri: String,
    version: String,
    #[serde(default = "default_true")]
    with_firmware_mode: bool,
    #[serde(default)]
    artifact: Vec<ArtifactEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArtifactEntry {
    project: String,
    package: String,
    kind: TestKind,
    repository: Option<String>,
    subdir: Option<String>,
    #[serde(default)]
    arch: Arch,
    #[serde(default)]
    extra_params: ParameterSet,
    #[serde(default = "default_true")]
    supports_firmware_mode: bool,
}

fn default_true() -> bool {
    true
}

impl From<ArtifactEntry> for ImageArtifact {
    fn from(entry: ArtifactEntry) -> Self {
        let mut artifact = match entry.kind {
            TestKind::LiveIso => ImageArtifact::live_iso(entry.project, entry.package),
            TestKind::InstallIso => ImageArtifact::install_iso(entry.project, entry.package),
            TestKind::DiskImage => ImageArtifact::disk_image(entry.project, entry.package),
        };
        if let Some(repository) = entry.repository {
            artifact = artifact.repository(repository);
        }
        if let Some(subdir) = entry.subdir {
            // an explicit empty string clears the ISO default
            artifact.subdir = None;
            artifact = artifact.subdir(subdir);
        }
        artifact.arch = entry.arch;
        artifact.supports_firmware_mode = entry.supports_firmware_mode;
        artifact.extra_params(entry.extra_params)
    }
}

/// Parse a matrix file into suites, in file order.
pub fn parse_matrix(content: &str) -> Result<Vec<DistroTestSuite>, MatrixError> {
    let file: MatrixFile = toml::from_str(content)?;
    file.suite
        .into_iter()
        .map(|entry| {
            if entry.artifact.is_empty() {
                return Err(MatrixError::EmptySuite {
                    suite: format!("{}+{}", entry.version, entry.distri),
                });
            }
            let mut suite = DistroTestSuite::new(
                entry.distri,
                entry.version,
                entry.artifact.into_iter().map(ImageArtifact::from).collect(),
            );
            suite.with_firmware_mode = entry.with_firmware_mode;
            Ok(suite)
        })
        .collect()
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
