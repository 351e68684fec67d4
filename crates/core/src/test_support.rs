// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::artifact::{DistroTestSuite, ImageArtifact};

/// OBS project used by test fixtures.
pub const TEST_PROJECT: &str = "Virtualization:Appliances:Images:Testing_x86:tumbleweed";

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the job state model.
pub mod strategies {
    use crate::artifact::TestKind;
    use crate::job::{JobResult, JobState};
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Scheduled),
            Just(JobState::Running),
            Just(JobState::Done),
            Just(JobState::Cancelled),
        ]
    }

    pub fn arb_job_result() -> impl Strategy<Value = JobResult> {
        prop_oneof![
            Just(JobResult::Scheduled),
            Just(JobResult::Passed),
            Just(JobResult::Softfailed),
            Just(JobResult::Failed),
            Just(JobResult::Skipped),
            Just(JobResult::Incomplete),
            Just(JobResult::UserCancelled),
            Just(JobResult::ParallelFailed),
            Just(JobResult::ParallelRestarted),
            Just(JobResult::UserRestarted),
            Just(JobResult::None),
            Just(JobResult::Obsoleted),
            Just(JobResult::TimeoutExceeded),
        ]
    }

    pub fn arb_test_kind() -> impl Strategy<Value = TestKind> {
        prop_oneof![Just(TestKind::LiveIso), Just(TestKind::InstallIso), Just(TestKind::DiskImage)]
    }
}

// ── Fixture factories ───────────────────────────────────────────────────

pub fn disk_artifact(package: &str) -> ImageArtifact {
    ImageArtifact::disk_image(TEST_PROJECT, package)
}

pub fn live_artifact(package: &str) -> ImageArtifact {
    ImageArtifact::live_iso(TEST_PROJECT, package)
}

pub fn install_artifact(package: &str) -> ImageArtifact {
    ImageArtifact::install_iso(TEST_PROJECT, package)
}

pub fn tumbleweed_suite(artifacts: Vec<ImageArtifact>) -> DistroTestSuite {
    DistroTestSuite::new("opensuse", "Tumbleweed", artifacts)
}
