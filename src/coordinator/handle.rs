use crate::fetch::task::TaskId;
use crate::fetch::FetchResult;
use serde::Serialize;

/// Lifecycle of a single task: `Created -> Running -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Created,
    Running,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

/// Token the coordinator holds for each task it spawned. Handles are only
/// created and advanced by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskHandle {
    id: TaskId,
    url: String,
    state: TaskState,
}

impl TaskHandle {
    pub(crate) fn new(id: TaskId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            state: TaskState::Created,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) fn mark_running(&mut self) {
        debug_assert_eq!(self.state, TaskState::Created);
        self.state = TaskState::Running;
    }

    pub(crate) fn mark_completed(&mut self, result: &FetchResult) {
        debug_assert_eq!(self.state, TaskState::Running);
        self.state = if result.is_success() {
            TaskState::Succeeded
        } else {
            TaskState::Failed
        };
    }
}
