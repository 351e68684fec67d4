// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! imgqa-adapters: clients for openQA and the Open Build Service

pub mod obs;
pub mod openqa;

pub use obs::{
    BuildService, BuildServiceError, HttpBuildService, ObsCredentials, DEFAULT_API_URL,
    DEFAULT_DOWNLOAD_DOMAIN,
};
pub use openqa::{sign_request, ApiCredentials, HttpOpenQa, OpenQaClient, OpenQaError};

#[cfg(any(test, feature = "test-support"))]
pub use obs::{BuildServiceCall, FakeBuildService};
#[cfg(any(test, feature = "test-support"))]
pub use openqa::{FakeOpenQa, OpenQaCall};
