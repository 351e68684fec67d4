// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Finding the one published binary of an image package.
//!
//! A package's binaries are intersected with what is published in its
//! repository. Exactly one image must remain, and its suffix must match the
//! artifact's test kind.

use imgqa_adapters::{BuildService, BuildServiceError, DEFAULT_DOWNLOAD_DOMAIN};
use imgqa_core::{ImageArtifact, TestKind, IMAGE_SUFFIXES};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(
        "expected one published binary for {package}, but got {}: {}",
        candidates.len(),
        candidates.join(", ")
    )]
    AmbiguousArtifact { package: String, candidates: Vec<String> },

    #[error("expected a {kind} image for {package} ({}), but got: {binary}", kind.expected_suffixes().join(" or "))]
    UnexpectedArtifactType { package: String, kind: TestKind, binary: String },

    #[error("build service lookup for {package} failed: {source}")]
    Remote { package: String, source: BuildServiceError },
}

/// Download URL of a published binary on the `download.` mirror.
///
/// Project namespaces become directories (`a:b` → `a:/b`).
pub fn download_url(
    download_domain: &str,
    artifact: &ImageArtifact,
    binary: &str,
    use_https: bool,
) -> String {
    let scheme = if use_https { "https" } else { "http" };
    let mut url = format!(
        "{scheme}://download.{download_domain}/repositories/{}/{}",
        artifact.project.replace(':', ":/"),
        artifact.repository
    );
    if let Some(subdir) = &artifact.subdir {
        url.push('/');
        url.push_str(subdir);
    }
    url.push('/');
    url.push_str(binary);
    url
}

/// Resolves artifacts against a build service
#[derive(Clone)]
pub struct ArtifactResolver<B: BuildService> {
    service: B,
    download_domain: String,
}

impl<B: BuildService> ArtifactResolver<B> {
    pub fn new(service: B) -> Self {
        Self { service, download_domain: DEFAULT_DOWNLOAD_DOMAIN.to_string() }
    }

    pub fn with_download_domain(mut self, domain: impl Into<String>) -> Self {
        self.download_domain = domain.into();
        self
    }

    /// The single published image of `artifact`.
    pub async fn published_binary(&self, artifact: &ImageArtifact) -> Result<String, ResolveError> {
        let remote = |source| ResolveError::Remote { package: artifact.package.clone(), source };

        let built = self
            .service
            .package_binaries(&artifact.project, &artifact.repository, artifact.arch, &artifact.package)
            .await
            .map_err(remote)?;
        let published: HashSet<String> = self
            .service
            .published_binaries(&artifact.project, &artifact.repository, artifact.subdir.as_deref())
            .await
            .map_err(remote)?
            .into_iter()
            .collect();

        let mut seen = HashSet::new();
        let mut candidates: Vec<String> = built
            .into_iter()
            .filter(|binary| IMAGE_SUFFIXES.iter().any(|suffix| binary.ends_with(suffix)))
            .filter(|binary| published.contains(binary))
            .filter(|binary| seen.insert(binary.clone()))
            .collect();

        if candidates.len() != 1 {
            return Err(ResolveError::AmbiguousArtifact {
                package: artifact.package.clone(),
                candidates,
            });
        }
        let binary = candidates.remove(0);

        if !artifact.kind.accepts(&binary) {
            return Err(ResolveError::UnexpectedArtifactType {
                package: artifact.package.clone(),
                kind: artifact.kind,
                binary,
            });
        }
        Ok(binary)
    }

    /// Download URL of the single published image of `artifact`.
    pub async fn resolve(&self, artifact: &ImageArtifact, use_https: bool) -> Result<String, ResolveError> {
        let binary = self.published_binary(artifact).await?;
        let url = download_url(&self.download_domain, artifact, &binary, use_https);
        tracing::debug!(package = %artifact.package, %url, "resolved artifact");
        Ok(url)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
