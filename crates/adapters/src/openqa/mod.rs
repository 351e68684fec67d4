// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! openQA test-execution service adapter
//!
//! Every call is a single request: no retries, no waiting. Callers that want
//! resilience wrap the calls themselves.
//!
//! ```text
//! GET  jobs/{id}          → job record
//! POST jobs/{id}/cancel   → ok / error     (signed)
//! POST jobs/{id}/restart  → ok / error     (signed)
//! POST isos?<params>      → creation reply (signed)
//! ```

mod http;

pub use http::{sign_request, HttpOpenQa};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOpenQa, OpenQaCall};

use async_trait::async_trait;
use imgqa_core::{Endpoint, Job, JobCreationReply, JobId, ParameterSet};
use thiserror::Error;

/// API key pair of an openQA user, needed for every mutating call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Errors from openQA requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenQaError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} answered {status}: {message}")]
    Status { url: String, status: u16, message: String },
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("no API key configured for {server}")]
    MissingCredentials { server: String },
}

/// Client for one openQA instance
#[async_trait]
pub trait OpenQaClient: Clone + Send + Sync + 'static {
    /// Instance this client talks to
    fn endpoint(&self) -> &Endpoint;

    async fn get_job(&self, id: JobId) -> Result<Job, OpenQaError>;

    async fn cancel_job(&self, id: JobId) -> Result<(), OpenQaError>;

    async fn restart_job(&self, id: JobId) -> Result<(), OpenQaError>;

    /// `POST isos`: create every job matching the product described by `params`.
    async fn create_jobs(&self, params: &ParameterSet) -> Result<JobCreationReply, OpenQaError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
