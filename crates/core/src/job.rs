// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! openQA job snapshots as returned by `GET jobs/{id}`.
//!
//! Jobs are owned by openQA; this crate only ever re-fetches them. The
//! lifecycle observed from the outside is:
//!
//! ```text
//! scheduled ──► running ──► done
//!     │            │
//!     └────────────┴──────► cancelled
//! ```
//!
//! A job can gain a `clone_id` at any point, which supersedes it without
//! changing its own state.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

crate::define_id! {
    /// Identifier openQA assigned to a job.
    pub struct JobId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[serde(alias = "assigned", alias = "setup")]
    Scheduled,
    #[serde(alias = "uploading")]
    Running,
    Done,
    Cancelled,
}

impl JobState {
    /// Whether openQA will not touch this job again (short of a clone).
    pub fn is_finished(self) -> bool {
        matches!(self, JobState::Done | JobState::Cancelled)
    }
}

crate::simple_display! {
    JobState {
        Scheduled => "scheduled",
        Running => "running",
        Done => "done",
        Cancelled => "cancelled",
    }
}

/// Outcome of a job. Only meaningful once the state is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobResult {
    Scheduled,
    Passed,
    Softfailed,
    Failed,
    Skipped,
    Incomplete,
    UserCancelled,
    ParallelFailed,
    ParallelRestarted,
    UserRestarted,
    None,
    Obsoleted,
    TimeoutExceeded,
}

crate::simple_display! {
    JobResult {
        Scheduled => "scheduled",
        Passed => "passed",
        Softfailed => "softfailed",
        Failed => "failed",
        Skipped => "skipped",
        Incomplete => "incomplete",
        UserCancelled => "user_cancelled",
        ParallelFailed => "parallel_failed",
        ParallelRestarted => "parallel_restarted",
        UserRestarted => "user_restarted",
        None => "none",
        Obsoleted => "obsoleted",
        TimeoutExceeded => "timeout_exceeded",
    }
}

/// Dependency edges of a job towards its parents or its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDependency {
    /// Jobs started after this one finished.
    #[serde(rename = "Chained", default)]
    pub chained: Vec<JobId>,
    /// Jobs running alongside this one.
    #[serde(rename = "Parallel", default)]
    pub parallel: Vec<JobId>,
    /// Jobs started on the same worker right after this one.
    #[serde(rename = "Directly chained", default)]
    pub directly_chained: Vec<JobId>,
}

impl JobDependency {
    pub fn is_empty(&self) -> bool {
        self.chained.is_empty() && self.parallel.is_empty() && self.directly_chained.is_empty()
    }
}

/// A test job on openQA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Full name of the test
    pub name: String,
    pub state: JobState,
    pub result: JobResult,
    #[serde(default, deserialize_with = "settings_as_strings")]
    pub settings: BTreeMap<String, String>,
    /// Id of the job this one has been cloned as
    #[serde(default)]
    pub clone_id: Option<JobId>,
    /// Original job if this one is a clone
    #[serde(default)]
    pub origin_id: Option<JobId>,
    #[serde(default)]
    pub children: JobDependency,
    #[serde(default)]
    pub parents: JobDependency,
    #[serde(default)]
    pub group: Option<String>,
    /// Lower runs earlier
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub t_started: Option<String>,
    #[serde(default)]
    pub t_finished: Option<String>,
}

impl Job {
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether a re-run superseded this job.
    pub fn is_cloned(&self) -> bool {
        self.clone_id.is_some()
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// `<DISTRI> <VERSION>: <image>` for one-line listings.
    pub fn summary(&self) -> String {
        let image = self.setting("HDD_1").or_else(|| self.setting("ISO_1")).unwrap_or("-");
        format!(
            "{} {}: {}",
            self.setting("DISTRI").unwrap_or("-"),
            self.setting("VERSION").unwrap_or("-"),
            image
        )
    }
}

/// openQA hands out settings as strings, but older instances emit numbers
/// for a few of them; normalize to text.
fn settings_as_strings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, v)
        })
        .collect())
}

/// Test builder for [`Job`] snapshots.
#[cfg(any(test, feature = "test-support"))]
pub struct JobBuilder {
    job: Job,
}

#[cfg(any(test, feature = "test-support"))]
impl JobBuilder {
    pub fn id(mut self, id: u64) -> Self {
        self.job.id = JobId::new(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.job.name = name.into();
        self
    }

    pub fn state(mut self, state: JobState) -> Self {
        self.job.state = state;
        self
    }

    pub fn result(mut self, result: JobResult) -> Self {
        self.job.result = result;
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.job.settings.insert(key.into(), value.into());
        self
    }

    pub fn clone_id(mut self, id: u64) -> Self {
        self.job.clone_id = Some(JobId::new(id));
        self
    }

    pub fn origin_id(mut self, id: u64) -> Self {
        self.job.origin_id = Some(JobId::new(id));
        self
    }

    pub fn chained_children(mut self, ids: &[u64]) -> Self {
        self.job.children.chained = ids.iter().copied().map(JobId::new).collect();
        self
    }

    pub fn parallel_children(mut self, ids: &[u64]) -> Self {
        self.job.children.parallel = ids.iter().copied().map(JobId::new).collect();
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Job {
    /// Create a builder for a scheduled job with test defaults.
    pub fn builder() -> JobBuilder {
        JobBuilder {
            job: Job {
                id: JobId::new(1),
                name: "opensuse-Tumbleweed-kiwi-test-disk-x86_64-Build20260101-kiwi_disk_image_test@64bit"
                    .to_string(),
                state: JobState::Scheduled,
                result: JobResult::None,
                settings: BTreeMap::new(),
                clone_id: None,
                origin_id: None,
                children: JobDependency::default(),
                parents: JobDependency::default(),
                group: None,
                priority: None,
                t_started: None,
                t_finished: None,
            },
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
