//! Observability sink passed explicitly to the coordinator and its tasks.

use crate::fetch::task::TaskId;
use crate::fetch::FetchError;
use serde::Serialize;
use std::sync::Mutex;

/// Trace point emitted during a fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    OrchestrationStarted {
        requests: usize,
    },
    JoinStarted {
        tasks: usize,
    },
    BeforeBodyRead {
        task: TaskId,
        url: String,
    },
    AfterBodyRead {
        task: TaskId,
        url: String,
        preview: String,
    },
    TaskFailed {
        task: TaskId,
        url: String,
        cause: FetchError,
    },
    ResultReported {
        url: String,
        preview: String,
    },
}

impl TraceEvent {
    /// URL the event refers to, if it belongs to a single task.
    pub fn url(&self) -> Option<&str> {
        match self {
            TraceEvent::BeforeBodyRead { url, .. }
            | TraceEvent::AfterBodyRead { url, .. }
            | TraceEvent::TaskFailed { url, .. }
            | TraceEvent::ResultReported { url, .. } => Some(url),
            TraceEvent::OrchestrationStarted { .. } | TraceEvent::JoinStarted { .. } => None,
        }
    }
}

pub trait TraceSink: Send + Sync {
    fn emit(&self, event: TraceEvent);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, event: TraceEvent) {
        match event {
            TraceEvent::OrchestrationStarted { requests } => {
                tracing::info!(requests, "orchestration started");
            }
            TraceEvent::JoinStarted { tasks } => {
                tracing::info!(tasks, "join started; waiting for every task");
            }
            TraceEvent::BeforeBodyRead { task, url } => {
                tracing::debug!(task = %task, url = %url, "before body read");
            }
            TraceEvent::AfterBodyRead { task, url, preview } => {
                tracing::debug!(task = %task, url = %url, preview = %preview, "after body read");
            }
            TraceEvent::TaskFailed { task, url, cause } => {
                tracing::warn!(task = %task, url = %url, error = %cause, "fetch task failed");
            }
            TraceEvent::ResultReported { url, preview } => {
                tracing::info!(url = %url, preview = %preview, "result reported");
            }
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TraceEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    pub fn events_for(&self, url: &str) -> Vec<TraceEvent> {
        self.lock()
            .iter()
            .filter(|event| event.url() == Some(url))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TraceEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, event: TraceEvent) {
        self.lock().push(event);
    }
}
