use super::error::FetchError;
use serde::Serialize;

/// Terminal outcome of one fetch task. Exactly one variant is produced per
/// task and it never transitions again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchResult {
    Success {
        url: String,
        status: u16,
        body: String,
    },
    Failure {
        url: String,
        cause: FetchError,
    },
}

impl FetchResult {
    pub fn url(&self) -> &str {
        match self {
            FetchResult::Success { url, .. } | FetchResult::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            FetchResult::Success { body, .. } => Some(body),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn cause(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure { cause, .. } => Some(cause),
        }
    }

    /// The `(url, body)` payload of a successful fetch; `None` for failures.
    pub fn payload(&self) -> Option<(&str, &str)> {
        match self {
            FetchResult::Success { url, body, .. } => Some((url, body)),
            FetchResult::Failure { .. } => None,
        }
    }
}
