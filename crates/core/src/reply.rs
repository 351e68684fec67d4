// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reply of openQA to a `POST isos` job-creation request.

use crate::job::JobId;
use serde::{Deserialize, Serialize};

/// One reply per creation call. openQA may create several jobs per call (one
/// per matching test suite) and may attach an error next to partial results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCreationReply {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub ids: Vec<JobId>,
    #[serde(default)]
    pub scheduled_product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobCreationReply {
    /// Reply recorded for a call that never got an answer from openQA.
    pub fn failed(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::default() }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
