// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory openQA for tests

use super::{OpenQaClient, OpenQaError};
use async_trait::async_trait;
use imgqa_core::{Endpoint, Job, JobCreationReply, JobId, JobState, ParameterSet};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

/// Recorded openQA call
#[derive(Debug, Clone, PartialEq)]
pub enum OpenQaCall {
    GetJob(JobId),
    Cancel(JobId),
    Restart(JobId),
    CreateJobs(ParameterSet),
}

struct FakeOpenQaState {
    jobs: BTreeMap<JobId, Job>,
    get_failures: HashMap<JobId, OpenQaError>,
    cancel_failures: HashMap<JobId, OpenQaError>,
    restart_failures: HashMap<JobId, OpenQaError>,
    replies: VecDeque<Result<JobCreationReply, OpenQaError>>,
    next_id: u64,
    calls: Vec<OpenQaCall>,
}

/// Fake openQA instance.
///
/// Unscripted `create_jobs` calls succeed with one fresh job id each;
/// `restart_job` clones the job under a fresh id like openQA does.
#[derive(Clone)]
pub struct FakeOpenQa {
    endpoint: Endpoint,
    inner: Arc<Mutex<FakeOpenQaState>>,
}

impl Default for FakeOpenQa {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

impl FakeOpenQa {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            inner: Arc::new(Mutex::new(FakeOpenQaState {
                jobs: BTreeMap::new(),
                get_failures: HashMap::new(),
                cancel_failures: HashMap::new(),
                restart_failures: HashMap::new(),
                replies: VecDeque::new(),
                next_id: 1000,
                calls: Vec::new(),
            })),
        }
    }

    pub fn insert_job(&self, job: Job) {
        let mut state = self.inner.lock();
        state.next_id = state.next_id.max(job.id.get() + 1);
        state.jobs.insert(job.id, job);
    }

    pub fn job(&self, id: JobId) -> Option<Job> {
        self.inner.lock().jobs.get(&id).cloned()
    }

    pub fn fail_get(&self, id: JobId, error: OpenQaError) {
        self.inner.lock().get_failures.insert(id, error);
    }

    pub fn fail_cancel(&self, id: JobId, error: OpenQaError) {
        self.inner.lock().cancel_failures.insert(id, error);
    }

    pub fn fail_restart(&self, id: JobId, error: OpenQaError) {
        self.inner.lock().restart_failures.insert(id, error);
    }

    /// Queue the outcome of the next unscripted `create_jobs` call.
    pub fn push_reply(&self, reply: Result<JobCreationReply, OpenQaError>) {
        self.inner.lock().replies.push_back(reply);
    }

    pub fn calls(&self) -> Vec<OpenQaCall> {
        self.inner.lock().calls.clone()
    }

    /// Parameter sets passed to `create_jobs`, in call order.
    pub fn created(&self) -> Vec<ParameterSet> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                OpenQaCall::CreateJobs(params) => Some(params.clone()),
                _ => None,
            })
            .collect()
    }
}

fn not_found(endpoint: &Endpoint, id: JobId) -> OpenQaError {
    OpenQaError::Status {
        url: endpoint.api_url(&format!("jobs/{id}")),
        status: 404,
        message: format!("Job {id} does not exist"),
    }
}

#[async_trait]
impl OpenQaClient for FakeOpenQa {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn get_job(&self, id: JobId) -> Result<Job, OpenQaError> {
        let mut state = self.inner.lock();
        state.calls.push(OpenQaCall::GetJob(id));
        if let Some(err) = state.get_failures.get(&id) {
            return Err(err.clone());
        }
        state.jobs.get(&id).cloned().ok_or_else(|| not_found(&self.endpoint, id))
    }

    async fn cancel_job(&self, id: JobId) -> Result<(), OpenQaError> {
        let mut state = self.inner.lock();
        state.calls.push(OpenQaCall::Cancel(id));
        if let Some(err) = state.cancel_failures.get(&id) {
            return Err(err.clone());
        }
        match state.jobs.get_mut(&id) {
            Some(job) => {
                if !job.is_finished() {
                    job.state = JobState::Cancelled;
                }
                Ok(())
            }
            None => Err(not_found(&self.endpoint, id)),
        }
    }

    async fn restart_job(&self, id: JobId) -> Result<(), OpenQaError> {
        let mut state = self.inner.lock();
        state.calls.push(OpenQaCall::Restart(id));
        if let Some(err) = state.restart_failures.get(&id) {
            return Err(err.clone());
        }
        let clone_id = JobId::new(state.next_id);
        let Some(job) = state.jobs.get_mut(&id) else {
            return Err(not_found(&self.endpoint, id));
        };
        job.clone_id = Some(clone_id);
        let mut clone = job.clone();
        clone.id = clone_id;
        clone.clone_id = None;
        clone.origin_id = Some(id);
        clone.state = JobState::Scheduled;
        clone.result = imgqa_core::JobResult::None;
        state.jobs.insert(clone_id, clone);
        state.next_id += 1;
        Ok(())
    }

    async fn create_jobs(&self, params: &ParameterSet) -> Result<JobCreationReply, OpenQaError> {
        let mut state = self.inner.lock();
        state.calls.push(OpenQaCall::CreateJobs(params.clone()));
        if let Some(reply) = state.replies.pop_front() {
            return reply;
        }
        let id = JobId::new(state.next_id);
        state.next_id += 1;
        Ok(JobCreationReply {
            count: 1,
            ids: vec![id],
            scheduled_product_id: id.get(),
            error: None,
        })
    }
}
