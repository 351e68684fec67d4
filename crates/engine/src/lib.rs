// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! imgqa-engine: turns test matrices into openQA jobs and follows them
//!
//! ```text
//! DistroTestSuite ─► Composer ─► ArtifactResolver ─► BuildService
//!                       │
//!                       ▼
//!               TriggerEngine ─► OpenQaClient ─► Build
//!                                                  │
//!                                                  ▼
//!                                     BuildTracker ─► OpenQaClient
//! ```

mod compose;
mod resolver;
mod tracker;
mod trigger;

pub use compose::{compose_params, ComposeError, Composer, RunOptions};
pub use resolver::{download_url, ArtifactResolver, ResolveError};
pub use tracker::{BuildTracker, RestartSummary, TrackerError};
pub use trigger::{TriggerEngine, TriggerError, TriggerRecord};
