// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory build service for tests

use super::{BuildService, BuildServiceError};
use async_trait::async_trait;
use imgqa_core::Arch;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded build service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildServiceCall {
    PackageBinaries { project: String, repository: String, arch: Arch, package: String },
    PublishedBinaries { project: String, repository: String, subdir: Option<String> },
}

#[derive(Default)]
struct FakeBuildServiceState {
    /// keyed by (project, repository, package)
    packages: HashMap<(String, String, String), Vec<String>>,
    /// keyed by (project, repository, subdir)
    published: HashMap<(String, String, Option<String>), Vec<String>>,
    failure: Option<BuildServiceError>,
    package_failures: HashMap<String, BuildServiceError>,
    calls: Vec<BuildServiceCall>,
}

/// Fake build service. Unknown packages and directories list nothing.
#[derive(Clone, Default)]
pub struct FakeBuildService {
    inner: Arc<Mutex<FakeBuildServiceState>>,
}

impl FakeBuildService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_package_binaries(
        &self,
        project: &str,
        repository: &str,
        package: &str,
        binaries: &[&str],
    ) {
        self.inner.lock().packages.insert(
            (project.to_string(), repository.to_string(), package.to_string()),
            binaries.iter().map(|b| b.to_string()).collect(),
        );
    }

    pub fn set_published(
        &self,
        project: &str,
        repository: &str,
        subdir: Option<&str>,
        binaries: &[&str],
    ) {
        self.inner.lock().published.insert(
            (project.to_string(), repository.to_string(), subdir.map(str::to_string)),
            binaries.iter().map(|b| b.to_string()).collect(),
        );
    }

    /// Build and publish `binaries` for one package in one step.
    pub fn publish(
        &self,
        project: &str,
        repository: &str,
        subdir: Option<&str>,
        package: &str,
        binaries: &[&str],
    ) {
        self.set_package_binaries(project, repository, package, binaries);
        let mut state = self.inner.lock();
        let listing = state
            .published
            .entry((project.to_string(), repository.to_string(), subdir.map(str::to_string)))
            .or_default();
        listing.extend(binaries.iter().map(|b| b.to_string()));
    }

    /// Make every following call fail with `error`.
    pub fn fail_with(&self, error: BuildServiceError) {
        self.inner.lock().failure = Some(error);
    }

    /// Make binary listings of `package` fail with `error`.
    pub fn fail_package(&self, package: &str, error: BuildServiceError) {
        self.inner.lock().package_failures.insert(package.to_string(), error);
    }

    pub fn calls(&self) -> Vec<BuildServiceCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl BuildService for FakeBuildService {
    async fn package_binaries(
        &self,
        project: &str,
        repository: &str,
        arch: Arch,
        package: &str,
    ) -> Result<Vec<String>, BuildServiceError> {
        let mut state = self.inner.lock();
        state.calls.push(BuildServiceCall::PackageBinaries {
            project: project.to_string(),
            repository: repository.to_string(),
            arch,
            package: package.to_string(),
        });
        if let Some(err) = state.failure.as_ref().or(state.package_failures.get(package)) {
            return Err(err.clone());
        }
        let key = (project.to_string(), repository.to_string(), package.to_string());
        Ok(state.packages.get(&key).cloned().unwrap_or_default())
    }

    async fn published_binaries(
        &self,
        project: &str,
        repository: &str,
        subdir: Option<&str>,
    ) -> Result<Vec<String>, BuildServiceError> {
        let mut state = self.inner.lock();
        state.calls.push(BuildServiceCall::PublishedBinaries {
            project: project.to_string(),
            repository: repository.to_string(),
            subdir: subdir.map(str::to_string),
        });
        if let Some(err) = &state.failure {
            return Err(err.clone());
        }
        let key = (project.to_string(), repository.to_string(), subdir.map(str::to_string));
        Ok(state.published.get(&key).cloned().unwrap_or_default())
    }
}
