// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Following the jobs of a build.
//!
//! When openQA re-runs a job it creates a clone under a new id and points
//! the old job's `clone_id` at it. Clones can be cloned again:
//!
//! ```text
//! 101 ──clone──► 150 ──clone──► 163   (163 is the job that counts)
//!                                │
//!                          chained children
//! ```
//!
//! Resolving a build replaces every cloned id with the last job of its chain
//! and pulls in that job's chained children. The original job's chained
//! children belong to the superseded run and are dropped.

use imgqa_adapters::{OpenQaClient, OpenQaError};
use imgqa_core::{Build, CancelFailure, FailurePolicy, Job, JobId, RestartFailure};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("failed to fetch job {job_id}: {source}")]
    Remote { job_id: JobId, source: OpenQaError },
    #[error("clone chain of job {origin} loops back to job {repeated}")]
    CloneCycleDetected { origin: JobId, repeated: JobId },
}

/// Outcome of restarting the failed jobs of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestartSummary {
    pub restarted: Vec<JobId>,
    pub failures: Vec<RestartFailure>,
}

/// Tracks builds on one openQA instance
#[derive(Clone)]
pub struct BuildTracker<C: OpenQaClient> {
    client: C,
}

impl<C: OpenQaClient> BuildTracker<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn fetch(&self, job_id: JobId) -> Result<Job, TrackerError> {
        self.client.get_job(job_id).await.map_err(|source| TrackerError::Remote { job_id, source })
    }

    /// Last job of the clone chain starting at `job`.
    async fn final_clone(&self, job: Job) -> Result<Job, TrackerError> {
        let origin = job.id;
        let mut visited = HashSet::from([job.id]);
        let mut current = job;
        while let Some(next) = current.clone_id {
            if !visited.insert(next) {
                return Err(TrackerError::CloneCycleDetected { origin, repeated: next });
            }
            current = self.fetch(next).await?;
        }
        Ok(current)
    }

    /// Replace cloned jobs by the ends of their clone chains.
    ///
    /// Jobs without a clone keep their id and position.
    pub async fn resolve_clones(&self, build: &Build) -> Result<Build, TrackerError> {
        let mut handled: HashSet<JobId> = HashSet::new();
        let mut resolved = Vec::with_capacity(build.job_ids.len());

        for &job_id in &build.job_ids {
            if handled.contains(&job_id) {
                continue;
            }
            let job = self.fetch(job_id).await?;
            if !job.is_cloned() {
                resolved.push(job_id);
                continue;
            }

            handled.extend(job.children.chained.iter().copied());
            let terminal = self.final_clone(job).await?;
            tracing::debug!(%job_id, clone = %terminal.id, "resolved clone chain");
            handled.extend(terminal.children.chained.iter().copied());
            resolved.push(terminal.id);
            resolved.extend(terminal.children.chained.iter().copied());
        }
        Ok(build.with_job_ids(resolved))
    }

    /// Current snapshot of every job, in build order.
    pub async fn fetch_states(&self, build: &Build) -> Result<IndexMap<JobId, Job>, TrackerError> {
        let mut states = IndexMap::with_capacity(build.job_ids.len());
        for &job_id in &build.job_ids {
            states.insert(job_id, self.fetch(job_id).await?);
        }
        Ok(states)
    }

    /// Jobs that are neither done nor cancelled, in build order.
    pub async fn unfinished_jobs(&self, build: &Build) -> Result<Vec<JobId>, TrackerError> {
        let states = self.fetch_states(build).await?;
        Ok(states.into_iter().filter(|(_, job)| !job.is_finished()).map(|(id, _)| id).collect())
    }

    /// Ask openQA to cancel every job of the build.
    ///
    /// Every job gets its cancel request; the ones openQA refused are returned.
    pub async fn cancel_all(&self, build: &Build) -> Vec<CancelFailure> {
        let mut failures = Vec::new();
        for &job_id in &build.job_ids {
            match self.client.cancel_job(job_id).await {
                Ok(()) => tracing::info!(%job_id, "cancelled job"),
                Err(e) => {
                    tracing::warn!(%job_id, error = %e, "cancel failed");
                    failures.push(CancelFailure { job_id, error: e.to_string() });
                }
            }
        }
        failures
    }

    /// Restart every finished job whose result `policy` counts as failed.
    pub async fn restart_failed(
        &self,
        build: &Build,
        policy: &FailurePolicy,
    ) -> Result<RestartSummary, TrackerError> {
        let states = self.fetch_states(build).await?;
        let mut summary = RestartSummary::default();
        for (job_id, job) in states {
            if !job.is_finished() || !policy.is_failed(job.result) {
                continue;
            }
            match self.client.restart_job(job_id).await {
                Ok(()) => {
                    tracing::info!(%job_id, result = %job.result, "restarted job");
                    summary.restarted.push(job_id);
                }
                Err(e) => {
                    tracing::warn!(%job_id, error = %e, "restart failed");
                    summary.failures.push(RestartFailure { job_id, error: e.to_string() });
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
