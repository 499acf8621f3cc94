//! Fan-out/join for a batch of fetch requests.
//!
//! Every task of a join is polled from a single `FuturesUnordered` owned by the
//! join future itself, so tasks interleave cooperatively on whichever thread is
//! polling the join and never run simultaneously. Results are collected in the
//! order tasks settle.

use super::handle::TaskHandle;
use super::result_set::{CompletedTask, ResultSet};
use crate::fetch::preview::DEFAULT_PREVIEW_CHARS;
use crate::fetch::task::TaskId;
use crate::fetch::{FetchRequest, FetchTask};
use crate::http::HttpClient;
use crate::runtime::config::OrchestratorConfig;
use crate::runtime::sink::{TraceEvent, TraceSink};
use crate::runtime::telemetry::Telemetry;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct JoinCoordinator {
    client: Arc<dyn HttpClient>,
    sink: Arc<dyn TraceSink>,
    telemetry: Arc<Telemetry>,
    preview_chars: usize,
}

impl JoinCoordinator {
    pub fn new(client: Arc<dyn HttpClient>, sink: Arc<dyn TraceSink>) -> Self {
        Self {
            client,
            sink,
            telemetry: Arc::new(Telemetry::default()),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn from_config(
        config: &OrchestratorConfig,
        client: Arc<dyn HttpClient>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        Self::new(client, sink).with_preview_chars(config.preview_chars())
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars.max(1);
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn telemetry(&self) -> Arc<Telemetry> {
        self.telemetry.clone()
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Starts one task per request and resolves once every task is terminal.
    ///
    /// Task ids follow input order; `done` follows completion order. The join
    /// itself cannot fail: task failures become `Failure` records.
    pub async fn join_all<I, R>(&self, requests: I) -> ResultSet
    where
        I: IntoIterator<Item = R>,
        R: Into<FetchRequest>,
    {
        let tasks: Vec<FetchTask> = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                FetchTask::new(TaskId(index as u64), request.into(), self.preview_chars)
            })
            .collect();

        let total = tasks.len();
        self.sink.emit(TraceEvent::JoinStarted { tasks: total });
        self.telemetry.record_spawned(total as u64);
        if total == 0 {
            return ResultSet::default();
        }

        let client = self.client.as_ref();
        let sink = self.sink.as_ref();
        let mut pending: BTreeMap<TaskId, TaskHandle> = BTreeMap::new();
        let mut in_flight = FuturesUnordered::new();

        for task in tasks {
            let id = task.id();
            let mut handle = TaskHandle::new(id, task.request().url());
            handle.mark_running();
            pending.insert(id, handle);
            in_flight.push(async move { (id, task.run(client, sink).await) });
        }

        tracing::debug!(tasks = total, "all fetch tasks started; waiting for completion");

        let mut done = Vec::with_capacity(total);
        while let Some((id, outcome)) = in_flight.next().await {
            let Some(mut handle) = pending.remove(&id) else {
                tracing::error!(task = %id, "completed task has no pending handle");
                continue;
            };
            handle.mark_completed(&outcome);
            self.telemetry.record_result(&outcome);
            tracing::debug!(
                task = %id,
                url = handle.url(),
                success = outcome.is_success(),
                remaining = pending.len(),
                "fetch task settled"
            );
            done.push(CompletedTask::new(handle, done.len(), outcome));
        }

        ResultSet::new(done, pending.into_values().collect())
    }
}
