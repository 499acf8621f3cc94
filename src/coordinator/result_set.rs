use super::handle::TaskHandle;
use crate::fetch::{FetchError, FetchResult};
use serde::Serialize;

/// A task that reached a terminal state, together with its position in the
/// completion sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTask {
    handle: TaskHandle,
    arrival: usize,
    outcome: FetchResult,
}

impl CompletedTask {
    pub(crate) fn new(handle: TaskHandle, arrival: usize, outcome: FetchResult) -> Self {
        Self {
            handle,
            arrival,
            outcome,
        }
    }

    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    /// Zero-based index in completion order.
    pub fn arrival(&self) -> usize {
        self.arrival
    }

    pub fn outcome(&self) -> &FetchResult {
        &self.outcome
    }

    pub fn into_outcome(self) -> FetchResult {
        self.outcome
    }

    /// `(url, body)` for a successful task, `None` when it failed.
    pub fn result(&self) -> Option<(&str, &str)> {
        self.outcome.payload()
    }
}

/// Output of a join: `done` in completion order and `pending`, which is empty
/// whenever the join ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    done: Vec<CompletedTask>,
    pending: Vec<TaskHandle>,
}

impl ResultSet {
    pub(crate) fn new(done: Vec<CompletedTask>, pending: Vec<TaskHandle>) -> Self {
        Self { done, pending }
    }

    pub fn done(&self) -> &[CompletedTask] {
        &self.done
    }

    pub fn pending(&self) -> &[TaskHandle] {
        &self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.done.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful `(url, body)` pairs in completion order; failures are skipped.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.done.iter().filter_map(CompletedTask::result)
    }

    /// Failed tasks with their retained cause, in completion order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.done
            .iter()
            .filter_map(|task| task.outcome().cause().map(|cause| (task.handle().url(), cause)))
    }

    /// URLs in the order their tasks completed.
    pub fn arrival_order(&self) -> Vec<&str> {
        self.done.iter().map(|task| task.handle().url()).collect()
    }

    pub fn into_results(self) -> Vec<FetchResult> {
        self.done.into_iter().map(CompletedTask::into_outcome).collect()
    }
}
