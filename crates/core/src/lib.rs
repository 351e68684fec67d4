// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! imgqa-core: data model for triggering and tracking openQA image tests

pub mod macros;

pub mod artifact;
pub mod build;
pub mod catalog;
pub mod classify;
pub mod job;
pub mod matrix;
pub mod params;
pub mod reply;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use artifact::{
    Arch, DistroTestSuite, HostOs, ImageArtifact, ParseEnumError, TestKind, UefiPflash,
    IMAGE_SUFFIXES,
};
pub use build::{Build, CancelFailure, Endpoint, RestartFailure, Scheme};
pub use classify::{is_failed, severity, FailurePolicy, Severity};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobDependency, JobId, JobResult, JobState};
pub use matrix::{parse_matrix, MatrixError};
pub use params::{keys, ParamValue, ParameterSet};
pub use reply::JobCreationReply;
