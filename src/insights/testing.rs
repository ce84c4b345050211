//! Scripted backend for tests
//!
//! Replays queued poll responses in order and records every submitted spec.

use super::backend::{BackendError, InsightsBackend, QueryId};
use super::types::{QueryResult, QuerySpec, QueryStatus};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedBackend {
    submit_error: Option<String>,
    responses: Mutex<VecDeque<Result<QueryResult, BackendError>>>,
    submitted: Mutex<Vec<QuerySpec>>,
    polls: Mutex<u64>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full poll response
    pub fn then(self, result: QueryResult) -> Self {
        self.push(Ok(result))
    }

    /// Queue an empty poll response with the given status
    pub fn then_status(self, status: QueryStatus) -> Self {
        self.push(Ok(QueryResult::pending(status)))
    }

    /// Queue a polling transport failure
    pub fn then_error(self, message: &str) -> Self {
        self.push(Err(BackendError::Poll(message.to_string())))
    }

    /// Make submission fail
    pub fn fail_submit(mut self, message: &str) -> Self {
        self.submit_error = Some(message.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<QuerySpec> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> u64 {
        *self.polls.lock().unwrap()
    }

    fn push(self, response: Result<QueryResult, BackendError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl InsightsBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start_query(&self, spec: &QuerySpec) -> Result<QueryId, BackendError> {
        self.submitted.lock().unwrap().push(spec.clone());
        match &self.submit_error {
            Some(message) => Err(BackendError::Submit(message.clone())),
            None => Ok("c3f1a2b4-0000-4000-8000-000000000001".to_string()),
        }
    }

    async fn get_query_results(&self, _query_id: &str) -> Result<QueryResult, BackendError> {
        *self.polls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Poll("script exhausted".to_string())))
    }
}
