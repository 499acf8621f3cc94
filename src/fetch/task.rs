//! One fetch task: request, read the body, and fold every failure (including
//! panics) into a terminal [`FetchResult`]. Nothing escapes the task boundary.

use super::error::FetchError;
use super::preview::body_preview;
use super::request::FetchRequest;
use super::result::FetchResult;
use crate::http::{HttpClient, HttpMethod};
use crate::runtime::sink::{TraceEvent, TraceSink};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;

/// Identifier assigned by the coordinator in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct FetchTask {
    id: TaskId,
    request: FetchRequest,
    preview_chars: usize,
}

impl FetchTask {
    pub fn new(id: TaskId, request: FetchRequest, preview_chars: usize) -> Self {
        Self {
            id,
            request,
            preview_chars,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    /// Drives the fetch to a terminal state. Never fails and never panics
    /// outward.
    pub async fn run(self, client: &dyn HttpClient, sink: &dyn TraceSink) -> FetchResult {
        let id = self.id;
        let url = self.request.url().to_owned();

        let outcome = AssertUnwindSafe(self.fetch(client, sink))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(FetchError::Panicked(panic_message(panic.as_ref()))));

        match outcome {
            Ok((status, body)) => FetchResult::Success { url, status, body },
            Err(cause) => {
                sink.emit(TraceEvent::TaskFailed {
                    task: id,
                    url: url.clone(),
                    cause: cause.clone(),
                });
                FetchResult::Failure { url, cause }
            }
        }
    }

    async fn fetch(
        &self,
        client: &dyn HttpClient,
        sink: &dyn TraceSink,
    ) -> Result<(u16, String), FetchError> {
        let url = self.request.url();
        let response = client.request(HttpMethod::Get, url).await?;
        let status = response.status();

        sink.emit(TraceEvent::BeforeBodyRead {
            task: self.id,
            url: url.to_owned(),
        });
        let body = response.text().await?;
        sink.emit(TraceEvent::AfterBodyRead {
            task: self.id,
            url: url.to_owned(),
            preview: body_preview(&body, self.preview_chars).to_owned(),
        });

        Ok((status, body))
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
