//! Failure taxonomy for a single fetch. Every variant is caught at the task
//! boundary and folded into a [`FetchResult::Failure`](super::FetchResult).

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FetchError {
    /// The URL carries no host that could be resolved.
    HostResolution(String),
    /// The host looked reachable but the connection could not be established.
    Connection(String),
    /// The server answered with something that is not a usable HTTP response.
    Protocol(String),
    /// The task panicked before reaching a terminal state.
    Panicked(String),
}

/// Discriminant of [`FetchError`], handy for counters and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    HostResolution,
    Connection,
    Protocol,
    Panicked,
}

impl FetchError {
    pub fn host_resolution(reason: impl Into<String>) -> Self {
        FetchError::HostResolution(reason.into())
    }

    pub fn connection(reason: impl Into<String>) -> Self {
        FetchError::Connection(reason.into())
    }

    pub fn protocol(reason: impl Into<String>) -> Self {
        FetchError::Protocol(reason.into())
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::HostResolution(_) => FetchErrorKind::HostResolution,
            FetchError::Connection(_) => FetchErrorKind::Connection,
            FetchError::Protocol(_) => FetchErrorKind::Protocol,
            FetchError::Panicked(_) => FetchErrorKind::Panicked,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            FetchError::HostResolution(reason)
            | FetchError::Connection(reason)
            | FetchError::Protocol(reason)
            | FetchError::Panicked(reason) => reason,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::HostResolution(reason) => {
                write!(f, "host could not be resolved: {reason}")
            }
            FetchError::Connection(reason) => write!(f, "connection failed: {reason}"),
            FetchError::Protocol(reason) => write!(f, "protocol error: {reason}"),
            FetchError::Panicked(reason) => write!(f, "fetch task panicked: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}
