// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameters of one `POST isos` call.
//!
//! Keys are emitted in a fixed order so that dry runs and logs are stable:
//! flavor, download URL, distribution fields, case directory, build, the
//! artifact's extra parameters and finally the firmware keys.

use crate::resolver::{ArtifactResolver, ResolveError};
use imgqa_adapters::BuildService;
use imgqa_core::{keys, DistroTestSuite, HostOs, ImageArtifact, ParameterSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("{package} cannot be booted in firmware (EFI) mode")]
    UnsupportedFirmwareMode { package: String },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Settings shared by every job of one trigger run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Git URL of the test distribution, passed as `CASEDIR`.
    pub casedir: String,
    /// Build identifier shown in the openQA UI.
    pub build: String,
    pub host_os: HostOs,
}

/// Build the parameter set for an artifact whose image lives at `url`.
pub fn compose_params(
    artifact: &ImageArtifact,
    suite: &DistroTestSuite,
    url: &str,
    firmware_mode: bool,
    options: &RunOptions,
) -> Result<ParameterSet, ComposeError> {
    if firmware_mode && !artifact.supports_firmware_mode {
        return Err(ComposeError::UnsupportedFirmwareMode { package: artifact.package.clone() });
    }

    let mut params = ParameterSet::new().with(keys::FLAVOR, artifact.kind.flavor(firmware_mode));
    if artifact.kind.is_iso() {
        params.insert(keys::ISO_1_URL, url);
    } else {
        let key = if url.ends_with(".xz") { keys::HDD_1_DECOMPRESS_URL } else { keys::HDD_1_URL };
        params.insert(key, url);
        // qemu snapshots break on vmdk backing files
        if url.contains("vmdk") {
            params.insert(keys::QEMU_DISABLE_SNAPSHOTS, 1_i64);
        }
    }

    params.insert(keys::DISTRI, suite.distri.as_str());
    params.insert(keys::ARCH, artifact.arch.to_string());
    params.insert(keys::VERSION, suite.version.as_str());
    params.insert(keys::PRODUCTDIR, ".");
    params.insert(keys::CASEDIR, options.casedir.as_str());
    // openQA does not derive the needles from CASEDIR on its own
    params.insert(keys::NEEDLES_DIR, options.casedir.as_str());
    params.insert(keys::BUILD, options.build.as_str());
    let mut extra = artifact.extra_params.clone();
    // the download URL key is owned by the resolved artifact
    for key in extra.download_url_keys() {
        tracing::warn!(package = %artifact.package, %key, "ignoring extra download URL parameter");
        extra.remove(key);
    }
    params.extend_from(&extra);

    if firmware_mode {
        let pflash = options.host_os.uefi_pflash();
        params.insert(keys::UEFI, 1_i64);
        params.insert(keys::UEFI_PFLASH_CODE, pflash.code);
        params.insert(keys::UEFI_PFLASH_VARS, pflash.vars);
    }
    Ok(params)
}

/// Resolves artifacts and composes their parameters
#[derive(Clone)]
pub struct Composer<B: BuildService> {
    resolver: ArtifactResolver<B>,
}

impl<B: BuildService> Composer<B> {
    pub fn new(resolver: ArtifactResolver<B>) -> Self {
        Self { resolver }
    }

    /// Compose the parameters of `artifact` in `suite`.
    ///
    /// Firmware support is checked before the build service is asked anything.
    pub async fn compose(
        &self,
        artifact: &ImageArtifact,
        suite: &DistroTestSuite,
        firmware_mode: bool,
        options: &RunOptions,
    ) -> Result<ParameterSet, ComposeError> {
        if firmware_mode && !artifact.supports_firmware_mode {
            return Err(ComposeError::UnsupportedFirmwareMode { package: artifact.package.clone() });
        }
        let url = self.resolver.resolve(artifact, suite.use_secure_download).await?;
        compose_params(artifact, suite, &url, firmware_mode, options)
    }
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
