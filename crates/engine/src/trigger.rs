// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expanding a suite into openQA job-creation calls.
//!
//! A run has two phases. Every (artifact, firmware mode) combination is
//! composed first, so a misconfigured matrix fails before any job exists.
//! A build service lookup that fails only marks its own combination. The
//! calls are then sent one after another; a failed call is recorded in its
//! reply and the remaining calls still go out.

use crate::compose::{ComposeError, Composer, RunOptions};
use crate::resolver::ResolveError;
use imgqa_adapters::{BuildService, OpenQaClient};
use imgqa_core::{Build, DistroTestSuite, JobCreationReply, ParameterSet, TestKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("cannot trigger {suite}: {source}")]
    Compose { suite: String, source: ComposeError },
}

/// One job-creation call of a trigger run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRecord {
    pub package: String,
    pub kind: TestKind,
    pub firmware_mode: bool,
    /// `Err` when the build service could not be asked about the artifact.
    /// No call is made for such a record.
    pub params: Result<ParameterSet, ComposeError>,
    /// `None` for dry runs and for records without parameters.
    pub reply: Option<JobCreationReply>,
}

impl TriggerRecord {
    pub fn is_error(&self) -> bool {
        self.params.is_err() || self.reply.as_ref().is_some_and(JobCreationReply::is_error)
    }

    /// Why this combination produced no jobs, if it failed.
    pub fn error(&self) -> Option<String> {
        match (&self.params, &self.reply) {
            (Err(e), _) => Some(e.to_string()),
            (Ok(_), Some(reply)) => reply.error.clone(),
            (Ok(_), None) => None,
        }
    }
}

/// Remote lookups fail per combination; everything else is a matrix error.
fn is_fatal(error: &ComposeError) -> bool {
    !matches!(error, ComposeError::Resolve(ResolveError::Remote { .. }))
}

/// Triggers suites on one openQA instance
#[derive(Clone)]
pub struct TriggerEngine<C: OpenQaClient, B: BuildService> {
    client: C,
    composer: Composer<B>,
}

impl<C: OpenQaClient, B: BuildService> TriggerEngine<C, B> {
    pub fn new(client: C, composer: Composer<B>) -> Self {
        Self { client, composer }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Every parameter set of `suite`, in artifact-then-mode order.
    pub async fn plan(
        &self,
        suite: &DistroTestSuite,
        options: &RunOptions,
    ) -> Result<Vec<TriggerRecord>, TriggerError> {
        let mut records = Vec::new();
        for artifact in &suite.artifacts {
            for &firmware_mode in suite.firmware_modes(artifact) {
                let params = self.composer.compose(artifact, suite, firmware_mode, options).await;
                if let Err(source) = &params {
                    if is_fatal(source) {
                        return Err(TriggerError::Compose {
                            suite: suite.key(),
                            source: source.clone(),
                        });
                    }
                    tracing::warn!(
                        package = %artifact.package,
                        firmware_mode,
                        error = %source,
                        "skipping combination"
                    );
                }
                records.push(TriggerRecord {
                    package: artifact.package.clone(),
                    kind: artifact.kind,
                    firmware_mode,
                    params,
                    reply: None,
                });
            }
        }
        Ok(records)
    }

    /// Create the jobs of `suite`, or only compose them when `dry_run` is set.
    pub async fn trigger(
        &self,
        suite: &DistroTestSuite,
        options: &RunOptions,
        dry_run: bool,
    ) -> Result<Vec<TriggerRecord>, TriggerError> {
        let mut records = self.plan(suite, options).await?;
        if !dry_run {
            self.submit(&mut records).await;
        }
        Ok(records)
    }

    /// Trigger several suites and collect every created job into one build.
    ///
    /// All suites are composed before the first job is created.
    pub async fn trigger_all(
        &self,
        suites: &[DistroTestSuite],
        options: &RunOptions,
        dry_run: bool,
    ) -> Result<(Build, Vec<TriggerRecord>), TriggerError> {
        let mut records = Vec::new();
        for suite in suites {
            records.extend(self.plan(suite, options).await?);
        }
        if !dry_run {
            self.submit(&mut records).await;
        }
        let build = Build::from_replies(
            options.build.clone(),
            self.client.endpoint(),
            records.iter().filter_map(|record| record.reply.as_ref()),
        );
        Ok((build, records))
    }

    async fn submit(&self, records: &mut [TriggerRecord]) {
        for record in records.iter_mut() {
            let Ok(params) = &record.params else { continue };
            let reply = match self.client.create_jobs(params).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(
                        package = %record.package,
                        firmware_mode = record.firmware_mode,
                        error = %e,
                        "job creation failed"
                    );
                    JobCreationReply::failed(e.to_string())
                }
            };
            match &reply.error {
                Some(error) => {
                    tracing::warn!(package = %record.package, %error, "openQA reported an error")
                }
                None => tracing::info!(package = %record.package, count = reply.count, "jobs created"),
            }
            record.reply = Some(reply);
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
