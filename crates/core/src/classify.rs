// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which job results count as failures.
//!
//! Kept as data instead of methods on [`JobResult`] so callers can swap the
//! policy (e.g. treat softfails as failures in a stricter report).

use crate::job::JobResult;

/// Results that are not failures under the default policy.
pub const NON_FAILING_RESULTS: &[JobResult] = &[
    JobResult::Scheduled,
    JobResult::Softfailed,
    JobResult::Passed,
    JobResult::None,
    JobResult::ParallelRestarted,
    JobResult::UserRestarted,
];

/// Coarse grading of a result, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// No verdict yet
    Pending,
    Ok,
    /// Passed with caveats, or not run for a benign reason
    Warning,
    Failure,
}

crate::simple_display! {
    Severity {
        Pending => "pending",
        Ok => "ok",
        Warning => "warning",
        Failure => "failure",
    }
}

/// Default severity table.
pub fn severity(result: JobResult) -> Severity {
    match result {
        JobResult::Scheduled | JobResult::None => Severity::Pending,
        JobResult::Passed => Severity::Ok,
        JobResult::Softfailed
        | JobResult::Skipped
        | JobResult::UserCancelled
        | JobResult::ParallelRestarted
        | JobResult::UserRestarted
        | JobResult::Obsoleted => Severity::Warning,
        JobResult::Failed
        | JobResult::Incomplete
        | JobResult::ParallelFailed
        | JobResult::TimeoutExceeded => Severity::Failure,
    }
}

/// Failure classification policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailurePolicy {
    non_failing: Vec<JobResult>,
}

impl FailurePolicy {
    pub fn new(non_failing: impl IntoIterator<Item = JobResult>) -> Self {
        Self { non_failing: non_failing.into_iter().collect() }
    }

    pub fn is_failed(&self, result: JobResult) -> bool {
        !self.non_failing.contains(&result)
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::new(NON_FAILING_RESULTS.iter().copied())
    }
}

/// [`FailurePolicy::is_failed`] under the default policy.
pub fn is_failed(result: JobResult) -> bool {
    !NON_FAILING_RESULTS.contains(&result)
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
