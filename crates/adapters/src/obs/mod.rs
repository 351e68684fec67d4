// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Open Build Service adapter: which binaries a package produced and which
//! of them are published.
//!
//! ```text
//! GET build/{project}/{repository}/{arch}/{package}  → <binarylist>
//! GET published/{project}/{repository}[/{subdir}]    → <directory>
//! ```

mod http;

pub use http::{parse_binarylist, parse_directory, HttpBuildService};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BuildServiceCall, FakeBuildService};

use async_trait::async_trait;
use imgqa_core::Arch;
use thiserror::Error;

/// API of build.opensuse.org
pub const DEFAULT_API_URL: &str = "https://api.opensuse.org";

/// Domain whose `download.` host mirrors published repositories.
pub const DEFAULT_DOWNLOAD_DOMAIN: &str = "opensuse.org";

/// OBS account used for API requests.
#[derive(Clone, PartialEq, Eq)]
pub struct ObsCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ObsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsCredentials").field("username", &self.username).finish_non_exhaustive()
    }
}

/// Errors from build service requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildServiceError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} answered {status}: {message}")]
    Status { url: String, status: u16, message: String },
}

/// Read-only view of a build service
#[async_trait]
pub trait BuildService: Clone + Send + Sync + 'static {
    /// File names of every binary the package built for `arch`.
    async fn package_binaries(
        &self,
        project: &str,
        repository: &str,
        arch: Arch,
        package: &str,
    ) -> Result<Vec<String>, BuildServiceError>;

    /// File names currently published in the repository (or its `subdir`).
    async fn published_binaries(
        &self,
        project: &str,
        repository: &str,
        subdir: Option<&str>,
    ) -> Result<Vec<String>, BuildServiceError>;
}
