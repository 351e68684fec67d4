// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The set of jobs triggered together, and where they run.

use crate::job::JobId;
use crate::reply::JobCreationReply;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Hostname of the public openQA instance.
pub const DEFAULT_SERVER: &str = "openqa.opensuse.org";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

crate::simple_display! {
    Scheme {
        Https => "https",
        Http => "http",
    }
}

impl FromStr for Scheme {
    type Err = crate::artifact::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "https" => Ok(Scheme::Https),
            "http" => Ok(Scheme::Http),
            other => Err(crate::artifact::ParseEnumError {
                what: "scheme",
                value: other.to_string(),
                expected: "https, http",
            }),
        }
    }
}

/// An openQA instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub server: String,
    pub scheme: Scheme,
}

impl Endpoint {
    pub fn new(server: impl Into<String>, scheme: Scheme) -> Self {
        Self { server: server.into(), scheme }
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.server)
    }

    /// URL of an API route below `/api/v1/`.
    pub fn api_url(&self, route: &str) -> String {
        format!("{}/api/v1/{}", self.base_url(), route.trim_start_matches('/'))
    }

    /// Web UI page of a job.
    pub fn test_url(&self, id: JobId) -> String {
        format!("{}/tests/{}", self.base_url(), id)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER, Scheme::Https)
    }
}

/// All jobs of one trigger invocation.
///
/// Serialized as a flat snapshot `{build, server, scheme, job_ids}` that the
/// monitor loads back later. Job ids are kept in trigger order without
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub build: String,
    pub server: String,
    #[serde(default)]
    pub scheme: Scheme,
    pub job_ids: Vec<JobId>,
}

impl Build {
    pub fn new(
        build: impl Into<String>,
        endpoint: &Endpoint,
        job_ids: impl IntoIterator<Item = JobId>,
    ) -> Self {
        Self {
            build: build.into(),
            server: endpoint.server.clone(),
            scheme: endpoint.scheme,
            job_ids: dedup_ordered(job_ids),
        }
    }

    /// Union of the job ids of every reply, in reply order.
    pub fn from_replies<'a>(
        build: impl Into<String>,
        endpoint: &Endpoint,
        replies: impl IntoIterator<Item = &'a JobCreationReply>,
    ) -> Self {
        let ids = replies.into_iter().flat_map(|reply| reply.ids.iter().copied());
        Self::new(build, endpoint, ids)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.server.clone(), self.scheme)
    }

    /// Same build and server, different jobs.
    pub fn with_job_ids(&self, job_ids: impl IntoIterator<Item = JobId>) -> Self {
        Self {
            build: self.build.clone(),
            server: self.server.clone(),
            scheme: self.scheme,
            job_ids: dedup_ordered(job_ids),
        }
    }

    pub fn len(&self) -> usize {
        self.job_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }
}

fn dedup_ordered(ids: impl IntoIterator<Item = JobId>) -> Vec<JobId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// A cancel request openQA refused (or that never reached it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelFailure {
    pub job_id: JobId,
    pub error: String,
}

impl fmt::Display for CancelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to cancel job {}, got {}", self.job_id, self.error)
    }
}

/// A restart request that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartFailure {
    pub job_id: JobId,
    pub error: String,
}

impl fmt::Display for RestartFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to restart job {}, got {}", self.job_id, self.error)
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
